//! Profile editing for the logged-in user.

use dioxus::prelude::*;

use crate::client::http_client::Transport;
use crate::client::session::{SessionCell, SessionManager};
use crate::client::token_storage::KeyValueStore;
use crate::client::use_session;
use crate::error::ApiError;
use crate::models::ProfileUpdate;
use crate::user::User;
use crate::views::fetch::{LOADING_TEXT, error_text};

/// Controlled state of the profile form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Current password, required by the backend to confirm changes.
    pub password: String,
}

impl ProfileFields {
    /// Seeds the form from the user's saved values. The password starts blank.
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password: String::new(),
        }
    }

    /// Builds the request body. Everything but the password is trimmed.
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn reset(&mut self, user: &User) {
        *self = Self::from_user(user);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProfileStatus {
    #[default]
    Idle,
    Saved,
    Failed(String),
}

pub async fn submit_profile<T, S, C>(
    session: &SessionManager<T, S, C>,
    fields: &ProfileFields,
) -> ProfileStatus
where
    T: Transport,
    S: KeyValueStore,
    C: SessionCell,
{
    if fields.password.is_empty() {
        return ProfileStatus::Failed(
            ApiError::message("Password is required to save changes").to_string(),
        );
    }

    match session.save_profile(&fields.to_update()).await {
        Ok(_) => ProfileStatus::Saved,
        Err(err) => ProfileStatus::Failed(err.to_string()),
    }
}

#[component]
pub fn ProfileForm() -> Element {
    let session = use_session();
    let user = session.current_user();
    let mut fields = use_signal(|| user.as_ref().map(ProfileFields::from_user).unwrap_or_default());
    let mut saving = use_signal(|| false);
    let mut status = use_signal(ProfileStatus::default);

    let Some(user) = user else {
        return rsx! { div { class: "container", "{LOADING_TEXT}" } };
    };

    let onsubmit = {
        let session = session.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let session = session.clone();
            saving.set(true);
            status.set(ProfileStatus::Idle);
            spawn(async move {
                let form = fields.read().clone();
                let outcome = submit_profile(&session, &form).await;
                if outcome == ProfileStatus::Saved {
                    fields.write().password.clear();
                }
                status.set(outcome);
                saving.set(false);
            });
        }
    };

    let reset = {
        let user = user.clone();
        move |_: MouseEvent| {
            fields.write().reset(&user);
            status.set(ProfileStatus::Idle);
        }
    };

    let feedback = match status() {
        ProfileStatus::Idle => rsx! {},
        ProfileStatus::Saved => rsx! { div { class: "alert success", "Profile updated!" } },
        ProfileStatus::Failed(message) => rsx! {
            div { class: "alert error", {error_text(&message)} }
        },
    };

    rsx! {
        div { class: "container",
            div { class: "panel",
                h2 { class: "section-title", "Profile" }
                div { class: "subtle",
                    strong { "Username: " }
                    "{user.username}"
                }
                form { class: "form", onsubmit,
                    div { class: "row",
                        label { r#for: "firstName", "First name" }
                        input {
                            id: "firstName",
                            value: "{fields.read().first_name}",
                            oninput: move |evt| fields.write().first_name = evt.value(),
                        }
                    }
                    div { class: "row",
                        label { r#for: "lastName", "Last name" }
                        input {
                            id: "lastName",
                            value: "{fields.read().last_name}",
                            oninput: move |evt| fields.write().last_name = evt.value(),
                        }
                    }
                    div { class: "row",
                        label { r#for: "email", "Email" }
                        input {
                            id: "email",
                            r#type: "email",
                            value: "{fields.read().email}",
                            oninput: move |evt| fields.write().email = evt.value(),
                        }
                    }
                    div { class: "row",
                        label { r#for: "password", "Confirm with password" }
                        input {
                            id: "password",
                            r#type: "password",
                            placeholder: "Enter password to save changes",
                            required: true,
                            value: "{fields.read().password}",
                            oninput: move |evt| fields.write().password = evt.value(),
                        }
                    }
                    div { class: "actions",
                        button { class: "btn primary", r#type: "submit", disabled: saving(),
                            if saving() { "Saving…" } else { "Save changes" }
                        }
                        button {
                            class: "btn outline",
                            r#type: "button",
                            disabled: saving(),
                            onclick: reset,
                            "Reset"
                        }
                    }
                    {feedback}
                }
            }
        }
    }
}
