//! Client-side plumbing for the Jobly front end.
//!
//! This module provides:
//! - The HTTP client for the Jobly REST API
//! - Token persistence in browser localStorage
//! - JWT payload decoding to find the logged-in username
//! - The session manager and the route guard predicates
//! - Dioxus hooks that share one session across the app
//!
//! # Example
//!
//! ```rust,ignore
//! use jobly::client::{use_session, authenticated_only, GuardDecision};
//!
//! let session = use_session();
//! if authenticated_only(&session.auth_state()) == GuardDecision::Render {
//!     // show the page
//! }
//! ```

pub mod guard;
pub mod http_client;
pub mod jwt;
pub mod session;
pub mod token_storage;
pub mod use_session;

// Re-export commonly used types and functions
pub use guard::{GuardDecision, RedirectTarget, anonymous_only, authenticated_only};
pub use http_client::{ApiRequest, JoblyApi, Method, ReqwestTransport, Transport};
pub use jwt::{TokenClaims, decode_token, decode_username};
pub use session::{AuthState, Session, SessionCell, SessionManager};
pub use token_storage::{KeyValueStore, LocalStorage, MemoryStorage, PlatformStorage, TokenStorage};
pub use use_session::{JoblySession, use_session, use_session_provider};
