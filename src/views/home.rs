use dioxus::prelude::*;

use crate::app::Route;
use crate::client::use_session;

/// Landing page: a greeting and shortcuts for users, calls to action for
/// visitors.
#[component]
pub fn Homepage() -> Element {
    let session = use_session();

    let Some(user) = session.current_user() else {
        return rsx! {
            section { class: "hero",
                div { class: "hero-content container",
                    h1 { "Find your next role." }
                    p { "Search companies and jobs, apply, and keep moving forward with JOBLY." }
                    div { class: "cta",
                        Link { class: "btn primary", to: Route::Login {}, "Log In" }
                        Link { class: "btn primary", to: Route::Signup {}, "Sign Up" }
                    }
                }
            }
        };
    };

    rsx! {
        section { class: "hero",
            div { class: "hero-content container",
                h1 { "Welcome back, {user.greeting_name()}." }
                p { "Browse companies, track openings, and apply with one click." }
                div { class: "cta",
                    Link { class: "btn primary", to: Route::Jobs {}, "Find Jobs" }
                    Link { class: "btn primary", to: Route::Companies {}, "Explore Companies" }
                }
            }
        }
        div { class: "container",
            div { class: "panel",
                h3 { class: "section-title", "Quick start" }
                div { class: "subtle", "Jump right in:" }
                div { class: "actions",
                    Link { class: "btn primary", to: Route::Jobs {}, "Browse Jobs" }
                    Link { class: "btn outline", to: Route::Companies {}, "See Companies" }
                    Link { class: "btn outline", to: Route::Profile {}, "Edit Profile" }
                }
            }
        }
    }
}

/// Top navigation. Links depend on whether someone is logged in.
#[component]
pub fn NavBar() -> Element {
    let session = use_session();
    let nav_class = if use_route::<Route>() == (Route::Homepage {}) {
        "nav"
    } else {
        "nav nav-hero"
    };

    let links = match session.current_user() {
        Some(user) => {
            let session = session.clone();
            rsx! {
                Link { to: Route::Companies {}, "Companies" }
                Link { to: Route::Jobs {}, "Jobs" }
                Link { to: Route::Profile {}, "Profile" }
                span { class: "spacer" }
                span { class: "signin-pill",
                    "Signed in as "
                    strong { "{user.username}" }
                }
                button {
                    aria_label: "Log out",
                    onclick: move |_| session.logout(),
                    "Log out"
                }
            }
        }
        None => rsx! {
            span { class: "spacer" }
            Link { to: Route::Login {}, "Login" }
            Link { to: Route::Signup {}, "Sign Up" }
        },
    };

    rsx! {
        div { class: nav_class,
            div { class: "nav-inner container",
                Link { to: Route::Homepage {}, "Jobly" }
                {links}
            }
        }
    }
}
