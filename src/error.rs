//! Error types shared by the API client and the session manager.
//!
//! Every failure that reaches a view is an [`ApiError`]: a non-empty list of
//! human-readable messages. Transport detail never leaks past the client.

use serde_json::Value;
use thiserror::Error;

/// Message used when the backend gives nothing more specific.
pub const GENERIC_API_ERROR: &str = "API Error";

/// Normalized failure of a backend call.
///
/// Always holds at least one message. `Display` joins the messages with
/// `", "`, which is how views show them.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", .messages.join(", "))]
pub struct ApiError {
    messages: Vec<String>,
}

impl ApiError {
    /// Creates an error from a list of messages, substituting
    /// [`GENERIC_API_ERROR`] when the list is empty.
    pub fn new(messages: Vec<String>) -> Self {
        if messages.is_empty() {
            Self::generic()
        } else {
            Self { messages }
        }
    }

    /// Creates an error holding a single message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// The catch-all `"API Error"`.
    pub fn generic() -> Self {
        Self::message(GENERIC_API_ERROR)
    }

    /// Extracts `error.message` from a backend error body.
    ///
    /// The backend sends either a single string or, for schema validation
    /// failures, an array of strings. Blank messages are dropped; anything
    /// else, or nothing left, collapses to the generic message.
    ///
    /// # Example
    ///
    /// ```
    /// # use jobly::ApiError;
    /// let body = serde_json::json!({ "error": { "message": "Invalid credentials", "status": 401 } });
    /// assert_eq!(ApiError::from_body(&body).messages(), ["Invalid credentials"]);
    /// ```
    pub fn from_body(body: &Value) -> Self {
        match body.pointer("/error/message") {
            Some(Value::String(message)) if !message.trim().is_empty() => {
                Self::message(message.clone())
            }
            Some(Value::Array(items)) => Self::new(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|message| !message.trim().is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            _ => Self::generic(),
        }
    }

    /// The individual messages, in backend order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Failure to read claims out of an auth token.
#[derive(Debug, Error)]
pub enum TokenDecodeError {
    #[error("Invalid JWT format: expected 3 parts separated by dots, got {0}")]
    Format(usize),

    #[error("Failed to decode token payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to parse token claims: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Reasons a token could not be resolved into a user.
///
/// Only logged; the session treats every variant as "not authenticated".
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Decode(#[from] TokenDecodeError),

    #[error("Failed to load current user: {0}")]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_with_string_message() {
        let body = json!({ "error": { "message": "Invalid username/password", "status": 401 } });
        let err = ApiError::from_body(&body);
        assert_eq!(err.messages(), ["Invalid username/password"]);
    }

    #[test]
    fn test_from_body_with_message_list() {
        let body = json!({
            "error": {
                "message": [
                    "instance.email does not conform to the \"email\" format",
                    "instance.password does not meet minimum length of 5"
                ],
                "status": 400
            }
        });
        let err = ApiError::from_body(&body);
        assert_eq!(err.messages().len(), 2);
        assert_eq!(
            err.to_string(),
            "instance.email does not conform to the \"email\" format, instance.password does not meet minimum length of 5"
        );
    }

    #[test]
    fn test_from_body_without_message_is_generic() {
        assert_eq!(ApiError::from_body(&json!({})), ApiError::generic());
        assert_eq!(ApiError::from_body(&Value::Null), ApiError::generic());
        assert_eq!(
            ApiError::from_body(&json!({ "error": { "message": 42 } })),
            ApiError::generic()
        );
    }

    #[test]
    fn test_from_body_with_empty_list_is_generic() {
        let body = json!({ "error": { "message": [] } });
        assert_eq!(ApiError::from_body(&body).messages(), [GENERIC_API_ERROR]);
    }

    #[test]
    fn test_from_body_with_blank_message_is_generic() {
        let body = json!({ "error": { "message": "" } });
        assert_eq!(ApiError::from_body(&body), ApiError::generic());

        let body = json!({ "error": { "message": "   " } });
        assert_eq!(ApiError::from_body(&body).to_string(), GENERIC_API_ERROR);
    }

    #[test]
    fn test_from_body_drops_blank_list_entries() {
        let body = json!({ "error": { "message": ["", "Duplicate username", " "] } });
        assert_eq!(ApiError::from_body(&body).messages(), ["Duplicate username"]);

        let body = json!({ "error": { "message": ["", "  "] } });
        assert_eq!(ApiError::from_body(&body), ApiError::generic());
    }

    #[test]
    fn test_new_never_empty() {
        let err = ApiError::new(Vec::new());
        assert_eq!(err.messages(), ["API Error"]);
    }

    #[test]
    fn test_display_joins_messages() {
        let err = ApiError::new(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(err.to_string(), "first, second");
    }

    #[test]
    fn test_session_error_wraps_api_error() {
        let err = SessionError::from(ApiError::message("No user: ghost"));
        assert_eq!(err.to_string(), "Failed to load current user: No user: ghost");
    }

    #[test]
    fn test_token_decode_error_message() {
        let err = TokenDecodeError::Format(2);
        assert!(err.to_string().contains("got 2"));
    }
}
