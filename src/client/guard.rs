//! Route guard predicates.
//!
//! Guards look only at whether a user is present. A session that is still
//! resolving has no user, so it is treated like a visitor.

use crate::client::session::AuthState;

/// Where a guard sends a visitor it turns away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    Home,
}

/// Outcome of evaluating a guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(RedirectTarget),
}

impl GuardDecision {
    pub fn should_render(self) -> bool {
        self == GuardDecision::Render
    }
}

/// Renders for logged-in users; sends everyone else to the login view.
pub fn authenticated_only(state: &AuthState) -> GuardDecision {
    if state.is_authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(RedirectTarget::Login)
    }
}

/// Renders for visitors; sends logged-in users home.
pub fn anonymous_only(state: &AuthState) -> GuardDecision {
    if state.is_authenticated() {
        GuardDecision::Redirect(RedirectTarget::Home)
    } else {
        GuardDecision::Render
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;

    #[test]
    fn test_authenticated_only() {
        let user = AuthState::Authenticated(User::new("testuser"));
        assert_eq!(authenticated_only(&user), GuardDecision::Render);
        assert_eq!(
            authenticated_only(&AuthState::Anonymous),
            GuardDecision::Redirect(RedirectTarget::Login)
        );
        assert_eq!(
            authenticated_only(&AuthState::Resolving),
            GuardDecision::Redirect(RedirectTarget::Login)
        );
    }

    #[test]
    fn test_anonymous_only() {
        let user = AuthState::Authenticated(User::new("testuser"));
        assert_eq!(
            anonymous_only(&user),
            GuardDecision::Redirect(RedirectTarget::Home)
        );
        assert!(anonymous_only(&AuthState::Anonymous).should_render());
        assert!(anonymous_only(&AuthState::Resolving).should_render());
    }
}
