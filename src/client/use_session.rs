//! Dioxus hooks for the shared Jobly session.
//!
//! The application root calls [`use_session_provider`] once; every view
//! below it gets the same [`JoblySession`] back from [`use_session`]. The
//! session state lives in a `Signal`, so reading it from a component
//! subscribes that component to login, logout and profile changes.

use dioxus::prelude::*;

use crate::client::http_client::{JoblyApi, ReqwestTransport};
use crate::client::session::{Session, SessionCell, SessionManager};
use crate::client::token_storage::{PlatformStorage, TokenStorage};
use crate::config::JoblyConfig;

/// The session type shared through context.
pub type JoblySession = SessionManager<ReqwestTransport, PlatformStorage, Signal<Session>>;

impl SessionCell for Signal<Session> {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.read())
    }

    fn update_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut signal = *self;
        f(&mut signal.write())
    }
}

/// Creates the session, restores the persisted token and starts resolving it.
///
/// Call once, at the root of the app. Resolution runs in the background;
/// watch [`SessionManager::is_ready`] to know when the first one finished.
///
/// # Example
///
/// ```ignore
/// #[component]
/// pub fn App() -> Element {
///     let session = use_session_provider(JoblyConfig::from_env());
///     if !session.is_ready() {
///         return rsx! { p { "Loading…" } };
///     }
///     rsx! { Router::<Route> {} }
/// }
/// ```
pub fn use_session_provider(config: JoblyConfig) -> JoblySession {
    let storage = use_hook(|| TokenStorage::new(PlatformStorage::default()));
    // seeded here so nothing writes the signal while this component renders
    let state = use_signal({
        let storage = storage.clone();
        move || Session::restored(storage.load())
    });

    let session = use_hook(move || {
        tracing::trace!("Creating session against {}", config.base_url);
        let api = JoblyApi::new(ReqwestTransport::new(), &config);
        SessionManager::with_state(api, storage, state)
    });

    use_hook({
        let session = session.clone();
        move || {
            spawn(async move {
                session.resolve().await;
            });
        }
    });

    use_context_provider(move || session)
}

/// Returns the session set up by [`use_session_provider`].
///
/// # Panics
///
/// Panics if no ancestor called [`use_session_provider`].
pub fn use_session() -> JoblySession {
    use_context::<JoblySession>()
}
