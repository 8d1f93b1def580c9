//! Session lifecycle: who is logged in, and with what token.
//!
//! [`SessionManager`] owns the token, mirrors it onto the API client and the
//! persistent store, and turns it into a [`User`] by decoding the username
//! and fetching the profile. The observable state lives in a [`Session`]
//! held by a [`SessionCell`]: a plain `Rc<RefCell<_>>` natively, a Dioxus
//! `Signal` in the browser so views re-render when it changes.
//!
//! No borrow of the session is held across an `.await`.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::client::http_client::{JoblyApi, Transport};
use crate::client::jwt::decode_username;
use crate::client::token_storage::{KeyValueStore, TokenStorage};
use crate::error::{ApiError, SessionError};
use crate::models::{LoginCredentials, ProfileUpdate, SignupData};
use crate::user::{JobId, User};

/// Authentication state derived from the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
    /// A token is being turned into a user.
    Resolving,
    /// Nobody is logged in, or the token could not be resolved.
    Anonymous,
    /// Token resolved to this user.
    Authenticated(User),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self, AuthState::Resolving)
    }
}

/// Client-side session state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    current_user: Option<User>,
    /// True once the latest resolution attempt finished, whatever its outcome.
    loaded: bool,
    /// True once the first resolution after start-up finished. Never reset.
    ready: bool,
    /// Applications sent but not yet confirmed.
    pending: BTreeSet<JobId>,
}

impl Session {
    /// An unresolved session holding a token restored from storage.
    pub fn restored(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn auth_state(&self) -> AuthState {
        match (&self.current_user, self.loaded) {
            (Some(user), _) => AuthState::Authenticated(user.clone()),
            (None, false) => AuthState::Resolving,
            (None, true) => AuthState::Anonymous,
        }
    }

    pub fn has_applied_to_job(&self, job_id: JobId) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|user| user.has_applied_to(job_id))
    }

    pub fn is_applying_to_job(&self, job_id: JobId) -> bool {
        self.pending.contains(&job_id)
    }

    fn finish_resolution(&mut self, user: Option<User>) {
        self.current_user = user;
        self.loaded = true;
        self.ready = true;
    }
}

/// Shared, interior-mutable holder of a [`Session`].
pub trait SessionCell {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R;
    fn update_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R;
}

impl SessionCell for Rc<RefCell<Session>> {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.borrow())
    }

    fn update_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Owns the session and performs every operation that changes it.
///
/// Clones share the API client, the storage and the session cell.
pub struct SessionManager<T, S, C> {
    api: JoblyApi<T>,
    storage: TokenStorage<S>,
    state: C,
}

impl<T, S: Clone, C: Clone> Clone for SessionManager<T, S, C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            storage: self.storage.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T, S, C> SessionManager<T, S, C>
where
    T: Transport,
    S: KeyValueStore,
    C: SessionCell,
{
    /// Creates a manager seeded with whatever token storage holds.
    ///
    /// The session starts unresolved; call [`resolve`](Self::resolve) to load
    /// the user.
    pub fn new(api: JoblyApi<T>, storage: TokenStorage<S>, state: C) -> Self {
        let token = storage.load();
        state.update_session(|session| *session = Session::restored(token));
        Self::with_state(api, storage, state)
    }

    /// Creates a manager around a cell already seeded with
    /// [`Session::restored`]. The cell is not written.
    pub fn with_state(api: JoblyApi<T>, storage: TokenStorage<S>, state: C) -> Self {
        api.set_token(None);
        Self {
            api,
            storage,
            state,
        }
    }

    pub fn api(&self) -> &JoblyApi<T> {
        &self.api
    }

    pub fn auth_state(&self) -> AuthState {
        self.state.with_session(Session::auth_state)
    }

    pub fn current_user(&self) -> Option<User> {
        self.state
            .with_session(|session| session.current_user().cloned())
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .with_session(|session| session.token().map(str::to_string))
    }

    pub fn is_loaded(&self) -> bool {
        self.state.with_session(Session::is_loaded)
    }

    pub fn is_ready(&self) -> bool {
        self.state.with_session(Session::is_ready)
    }

    pub fn has_applied_to_job(&self, job_id: JobId) -> bool {
        self.state
            .with_session(|session| session.has_applied_to_job(job_id))
    }

    pub fn is_applying_to_job(&self, job_id: JobId) -> bool {
        self.state
            .with_session(|session| session.is_applying_to_job(job_id))
    }

    /// Turns the current token into a user.
    ///
    /// Without a token this completes immediately as anonymous. Otherwise the
    /// username is decoded from the token and the profile fetched; any
    /// failure leaves the session anonymous and unsets the API client's
    /// token. `loaded` is true afterwards in every case, unless the token was
    /// replaced while the fetch was in flight, in which case this result is
    /// discarded and the newer resolution decides.
    pub async fn resolve(&self) -> AuthState {
        let Some(token) = self.token() else {
            tracing::trace!("No auth token, session is anonymous");
            self.api.set_token(None);
            self.state
                .update_session(|session| session.finish_resolution(None));
            return AuthState::Anonymous;
        };

        tracing::trace!("Resolving current user from auth token");
        self.state.update_session(|session| {
            session.current_user = None;
            session.loaded = false;
        });
        self.api.set_token(Some(token.clone()));

        let outcome = self.fetch_user(&token).await;

        if self.token().as_deref() != Some(token.as_str()) {
            tracing::debug!("Auth token changed during resolution, discarding result");
            return self.auth_state();
        }

        match outcome {
            Ok(user) => {
                tracing::trace!("Session authenticated as {}", user.username);
                self.state
                    .update_session(|session| session.finish_resolution(Some(user)));
            }
            Err(err) => {
                tracing::warn!("Could not resolve auth token, continuing anonymously: {}", err);
                self.api.set_token(None);
                self.state
                    .update_session(|session| session.finish_resolution(None));
            }
        }

        self.auth_state()
    }

    async fn fetch_user(&self, token: &str) -> Result<User, SessionError> {
        let username = decode_username(token)?;
        Ok(self.api.get_current_user(&username).await?)
    }

    /// Replaces the token (persisting it) and resolves the new session.
    pub async fn set_token(&self, token: Option<String>) -> AuthState {
        self.storage.store(token.as_deref());
        self.state.update_session(|session| session.token = token);
        self.resolve().await
    }

    /// Exchanges credentials for a token and resolves the session.
    ///
    /// Backend errors are returned to the caller; the session is untouched.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthState, ApiError> {
        tracing::trace!("Logging in as {}", credentials.username);
        let token = self.api.login(credentials).await?;
        Ok(self.set_token(Some(token)).await)
    }

    /// Registers a new account and resolves the session with its token.
    pub async fn signup(&self, data: &SignupData) -> Result<AuthState, ApiError> {
        tracing::trace!("Signing up {}", data.username);
        let token = self.api.signup(data).await?;
        Ok(self.set_token(Some(token)).await)
    }

    /// Forgets the token and the user. No network call.
    pub fn logout(&self) {
        tracing::trace!("Logging out");
        self.storage.clear();
        self.api.set_token(None);
        self.state.update_session(|session| {
            session.token = None;
            session.pending.clear();
            session.finish_resolution(None);
        });
    }

    /// Applies the current user to a job.
    ///
    /// Does nothing without a user, or when the job is already applied to or
    /// an application for it is in flight. The local application set only
    /// changes once the backend confirms.
    pub async fn apply_to_job(&self, job_id: JobId) -> Result<(), ApiError> {
        let username = self.state.update_session(|session| {
            let user = session.current_user.as_ref()?;
            if user.has_applied_to(job_id) || !session.pending.insert(job_id) {
                return None;
            }
            Some(user.username.clone())
        });

        let Some(username) = username else {
            tracing::trace!("Skipping application to job {}", job_id);
            return Ok(());
        };

        let result = self.api.apply_to_job(&username, job_id).await;

        self.state.update_session(|session| {
            session.pending.remove(&job_id);
            if result.is_ok() {
                if let Some(user) = session
                    .current_user
                    .as_mut()
                    .filter(|user| user.username == username)
                {
                    user.applications.insert(job_id);
                }
            }
        });

        match result {
            Ok(_) => {
                tracing::trace!("{} applied to job {}", username, job_id);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Application to job {} failed: {}", job_id, err);
                Err(err)
            }
        }
    }

    /// Saves profile changes for the current user and merges the result
    /// into the session.
    pub async fn save_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let username = self
            .state
            .with_session(|session| session.current_user().map(|user| user.username.clone()))
            .ok_or_else(|| ApiError::message("You must be logged in to update your profile"))?;

        let saved = self.api.save_profile(&username, update).await?;

        let merged = self.state.update_session(|session| {
            let user = session
                .current_user
                .as_mut()
                .filter(|user| user.username == username)?;
            user.merge_profile(saved.clone());
            Some(user.clone())
        });

        Ok(merged.unwrap_or(saved))
    }
}
