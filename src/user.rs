//! The logged-in user's profile as returned by `GET /users/:username`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Backend identifier of a job posting.
pub type JobId = u64;

/// Full profile of an authenticated user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique login name; immutable after signup.
    pub username: String,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    /// Admin flag. Older backends omit it from some responses.
    #[serde(default)]
    pub is_admin: bool,

    /// Jobs this user has applied to.
    ///
    /// Only ever grows on the client; there is no withdraw operation.
    #[serde(default)]
    pub applications: BTreeSet<JobId>,
}

impl User {
    /// Creates a user with the given username and no profile details.
    ///
    /// # Example
    ///
    /// ```
    /// # use jobly::User;
    /// let user = User::new("testuser");
    /// assert_eq!(user.username, "testuser");
    /// assert!(user.applications.is_empty());
    /// ```
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            is_admin: false,
            applications: BTreeSet::new(),
        }
    }

    /// Name used to greet the user: first name, else username.
    pub fn greeting_name(&self) -> &str {
        let first = self.first_name.trim();
        if first.is_empty() {
            &self.username
        } else {
            first
        }
    }

    /// Returns true if the user has applied to the given job.
    pub fn has_applied_to(&self, job_id: JobId) -> bool {
        self.applications.contains(&job_id)
    }

    /// Copies the editable profile fields from a freshly saved record.
    ///
    /// `PATCH /users/:username` does not return applications, so those are
    /// kept, as is the username.
    pub fn merge_profile(&mut self, saved: User) {
        self.first_name = saved.first_name;
        self.last_name = saved.last_name;
        self.email = saved.email;
        self.is_admin = saved.is_admin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            username: "testuser".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "test@example.com".to_string(),
            is_admin: false,
            applications: BTreeSet::from([1, 7]),
        }
    }

    #[test]
    fn test_deserialization_from_backend_shape() {
        let json = r#"{
            "username": "testuser",
            "firstName": "Test",
            "lastName": "User",
            "email": "test@example.com",
            "isAdmin": true,
            "applications": [3, 1, 3]
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "testuser");
        assert_eq!(user.first_name, "Test");
        assert_eq!(user.last_name, "User");
        assert!(user.is_admin);
        assert_eq!(user.applications.len(), 2);
        assert!(user.has_applied_to(3));
    }

    #[test]
    fn test_deserialization_without_optional_fields() {
        let json = r#"{
            "username": "testuser",
            "firstName": "Test",
            "lastName": "User",
            "email": "test@example.com"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.is_admin);
        assert!(user.applications.is_empty());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = serde_json::to_string(&test_user()).unwrap();
        assert!(json.contains("\"firstName\":\"Test\""));
        assert!(json.contains("\"isAdmin\":false"));
    }

    #[test]
    fn test_greeting_name_prefers_first_name() {
        assert_eq!(test_user().greeting_name(), "Test");
    }

    #[test]
    fn test_greeting_name_falls_back_to_username() {
        let user = User::new("testuser");
        assert_eq!(user.greeting_name(), "testuser");
    }

    #[test]
    fn test_has_applied_to() {
        let user = test_user();
        assert!(user.has_applied_to(7));
        assert!(!user.has_applied_to(2));
    }

    #[test]
    fn test_merge_profile_keeps_username_and_applications() {
        let mut user = test_user();
        let mut saved = User::new("someone-else");
        saved.first_name = "New".to_string();
        saved.last_name = "Name".to_string();
        saved.email = "new@example.com".to_string();

        user.merge_profile(saved);

        assert_eq!(user.username, "testuser");
        assert_eq!(user.first_name, "New");
        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.applications, BTreeSet::from([1, 7]));
    }
}
