//! Route wrappers that render their children or redirect.

use dioxus::prelude::*;

use crate::app::Route;
use crate::client::guard::{GuardDecision, RedirectTarget, anonymous_only, authenticated_only};
use crate::client::session::AuthState;
use crate::client::use_session;

impl From<RedirectTarget> for Route {
    fn from(target: RedirectTarget) -> Self {
        match target {
            RedirectTarget::Login => Route::Login {},
            RedirectTarget::Home => Route::Homepage {},
        }
    }
}

/// Evaluates `predicate` on every render. On a redirect decision the current
/// history entry is replaced with the target, so Back skips the guarded page.
fn use_guard(predicate: fn(&AuthState) -> GuardDecision) -> GuardDecision {
    let session = use_session();
    let nav = navigator();
    let decision = predicate(&session.auth_state());

    use_effect(move || {
        if let GuardDecision::Redirect(target) = predicate(&session.auth_state()) {
            tracing::trace!("Guard redirecting to {:?}", target);
            nav.replace(Route::from(target));
        }
    });

    decision
}

/// Only for logged-in users; visitors are sent to the login page.
#[component]
pub fn PrivateRoute(children: Element) -> Element {
    if use_guard(authenticated_only).should_render() {
        children
    } else {
        rsx! {}
    }
}

/// Only for visitors; logged-in users are sent home.
#[component]
pub fn AnonRoute(children: Element) -> Element {
    if use_guard(anonymous_only).should_render() {
        children
    } else {
        rsx! {}
    }
}
