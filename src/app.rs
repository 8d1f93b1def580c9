//! Root component and route table.

use dioxus::prelude::*;

use crate::client::use_session_provider;
use crate::config::JoblyConfig;
use crate::views::{
    AnonRoute, CompanyDetail, CompanyList, Homepage, JobList, LoginForm, NavBar, PrivateRoute,
    ProfileForm, SignupForm,
};
use crate::views::fetch::LOADING_TEXT;

#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Homepage {},
        #[route("/companies")]
        Companies {},
        #[route("/companies/:handle")]
        CompanyPage { handle: String },
        #[route("/jobs")]
        Jobs {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        Signup {},
        #[route("/profile")]
        Profile {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Application root.
///
/// Owns the session and holds the router back until the persisted token
/// has been resolved once, so guards never see a half-restored session.
#[component]
pub fn App() -> Element {
    let session = use_session_provider(JoblyConfig::from_env());

    if !session.is_ready() {
        return rsx! { div { class: "container", "{LOADING_TEXT}" } };
    }

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn Shell() -> Element {
    rsx! {
        NavBar {}
        main { Outlet::<Route> {} }
    }
}

#[component]
fn Companies() -> Element {
    rsx! { PrivateRoute { CompanyList {} } }
}

#[component]
fn CompanyPage(handle: String) -> Element {
    rsx! { PrivateRoute { CompanyDetail { handle } } }
}

#[component]
fn Jobs() -> Element {
    rsx! { PrivateRoute { JobList {} } }
}

#[component]
fn Profile() -> Element {
    rsx! { PrivateRoute { ProfileForm {} } }
}

#[component]
fn Login() -> Element {
    rsx! { AnonRoute { LoginForm {} } }
}

#[component]
fn Signup() -> Element {
    rsx! { AnonRoute { SignupForm {} } }
}

/// Unknown paths go home.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = navigator();
    use_effect(move || {
        tracing::debug!("No route for /{}, redirecting home", segments.join("/"));
        nav.replace(Route::Homepage {});
    });
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Homepage {}.to_string(), "/");
        assert_eq!(Route::Companies {}.to_string(), "/companies");
        assert_eq!(
            Route::CompanyPage { handle: "apple".to_string() }.to_string(),
            "/companies/apple"
        );
        assert_eq!(Route::Profile {}.to_string(), "/profile");
    }

    #[test]
    fn test_unknown_path_parses_to_not_found() {
        let route = "/nowhere/at/all".parse::<Route>().ok();
        assert!(matches!(route, Some(Route::NotFound { .. })));

        let route = "/jobs".parse::<Route>().ok();
        assert_eq!(route, Some(Route::Jobs {}));
    }
}
