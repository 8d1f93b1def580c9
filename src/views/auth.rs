//! Login and signup forms.
//!
//! Submission goes through the session manager; on success the form
//! navigates home, on failure it shows the backend's messages inline and
//! stays put.

use dioxus::prelude::*;

use crate::app::Route;
use crate::client::http_client::Transport;
use crate::client::session::{SessionCell, SessionManager};
use crate::client::token_storage::KeyValueStore;
use crate::client::use_session;
use crate::error::ApiError;
use crate::models::{LoginCredentials, SignupData};
use crate::views::fetch::error_text;

/// What a form does after a submit attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Navigate(Route),
    /// Error text to show; messages joined with `", "`.
    Failed(String),
}

impl From<Result<(), ApiError>> for SubmitOutcome {
    fn from(result: Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => SubmitOutcome::Navigate(Route::Homepage {}),
            Err(err) => SubmitOutcome::Failed(err.to_string()),
        }
    }
}

fn require(value: &str, label: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::message(format!("{} is required", label)))
    } else {
        Ok(())
    }
}

/// Controlled state of the login form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginFields {
    pub username: String,
    pub password: String,
}

impl LoginFields {
    /// Checks the required fields and builds the request body.
    pub fn validate(&self) -> Result<LoginCredentials, ApiError> {
        require(&self.username, "Username")?;
        require(&self.password, "Password")?;
        Ok(LoginCredentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Controlled state of the signup form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignupFields {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl SignupFields {
    pub fn validate(&self) -> Result<SignupData, ApiError> {
        require(&self.username, "Username")?;
        require(&self.password, "Password")?;
        require(&self.first_name, "First name")?;
        require(&self.last_name, "Last name")?;
        require(&self.email, "Email")?;
        Ok(SignupData {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }
}

pub async fn submit_login<T, S, C>(
    session: &SessionManager<T, S, C>,
    fields: &LoginFields,
) -> SubmitOutcome
where
    T: Transport,
    S: KeyValueStore,
    C: SessionCell,
{
    let result = match fields.validate() {
        Ok(credentials) => session.login(&credentials).await.map(|_| ()),
        Err(err) => Err(err),
    };
    result.into()
}

pub async fn submit_signup<T, S, C>(
    session: &SessionManager<T, S, C>,
    fields: &SignupFields,
) -> SubmitOutcome
where
    T: Transport,
    S: KeyValueStore,
    C: SessionCell,
{
    let result = match fields.validate() {
        Ok(data) => session.signup(&data).await.map(|_| ()),
        Err(err) => Err(err),
    };
    result.into()
}

#[component]
pub fn LoginForm() -> Element {
    let session = use_session();
    let mut fields = use_signal(LoginFields::default);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let nav = navigator();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        submitting.set(true);
        error.set(None);
        spawn(async move {
            let form = fields.read().clone();
            match submit_login(&session, &form).await {
                SubmitOutcome::Navigate(route) => {
                    nav.push(route);
                }
                SubmitOutcome::Failed(message) => error.set(Some(message)),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "container",
            div { class: "panel",
                h2 { class: "section-title", "Log in" }
                div { class: "subtle", "Welcome back. Sign in to continue." }
                form { class: "form", novalidate: true, onsubmit,
                    div { class: "row",
                        label { r#for: "username", "Username" }
                        input {
                            id: "username",
                            name: "username",
                            autocomplete: "username",
                            required: true,
                            value: "{fields.read().username}",
                            oninput: move |evt| fields.write().username = evt.value(),
                        }
                    }
                    div { class: "row",
                        label { r#for: "password", "Password" }
                        input {
                            id: "password",
                            name: "password",
                            r#type: "password",
                            autocomplete: "current-password",
                            required: true,
                            value: "{fields.read().password}",
                            oninput: move |evt| fields.write().password = evt.value(),
                        }
                    }
                    div { class: "actions",
                        button { class: "btn primary", r#type: "submit", disabled: submitting(),
                            if submitting() { "Signing in…" } else { "Sign in" }
                        }
                        Link { class: "btn outline", to: Route::Signup {}, "Create account" }
                    }
                    if let Some(message) = error() {
                        div { class: "alert error", {error_text(&message)} }
                    }
                }
            }
        }
    }
}

#[component]
pub fn SignupForm() -> Element {
    let session = use_session();
    let mut fields = use_signal(SignupFields::default);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let nav = navigator();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        submitting.set(true);
        error.set(None);
        spawn(async move {
            let form = fields.read().clone();
            match submit_signup(&session, &form).await {
                SubmitOutcome::Navigate(route) => {
                    nav.push(route);
                }
                SubmitOutcome::Failed(message) => error.set(Some(message)),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "container",
            div { class: "panel",
                h2 { class: "section-title", "Create your account" }
                div { class: "subtle", "Join Jobly to search companies and apply to jobs." }
                form { class: "form", novalidate: true, onsubmit,
                    div { class: "row",
                        label { r#for: "username", "Username" }
                        input {
                            id: "username",
                            autocomplete: "username",
                            required: true,
                            value: "{fields.read().username}",
                            oninput: move |evt| fields.write().username = evt.value(),
                        }
                    }
                    div { class: "row",
                        label { r#for: "password", "Password" }
                        input {
                            id: "password",
                            r#type: "password",
                            autocomplete: "new-password",
                            required: true,
                            value: "{fields.read().password}",
                            oninput: move |evt| fields.write().password = evt.value(),
                        }
                    }
                    div { class: "row",
                        label { r#for: "firstName", "First name" }
                        input {
                            id: "firstName",
                            autocomplete: "given-name",
                            required: true,
                            value: "{fields.read().first_name}",
                            oninput: move |evt| fields.write().first_name = evt.value(),
                        }
                    }
                    div { class: "row",
                        label { r#for: "lastName", "Last name" }
                        input {
                            id: "lastName",
                            autocomplete: "family-name",
                            required: true,
                            value: "{fields.read().last_name}",
                            oninput: move |evt| fields.write().last_name = evt.value(),
                        }
                    }
                    div { class: "row",
                        label { r#for: "email", "Email" }
                        input {
                            id: "email",
                            r#type: "email",
                            autocomplete: "email",
                            required: true,
                            value: "{fields.read().email}",
                            oninput: move |evt| fields.write().email = evt.value(),
                        }
                    }
                    div { class: "actions",
                        button { class: "btn primary", r#type: "submit", disabled: submitting(),
                            if submitting() { "Creating…" } else { "Create account" }
                        }
                        Link { class: "btn outline", to: Route::Login {}, "I already have an account" }
                    }
                    if let Some(message) = error() {
                        div { class: "alert error", {error_text(&message)} }
                    }
                }
            }
        }
    }
}
