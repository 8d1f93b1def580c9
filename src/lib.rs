//! # jobly
//!
//! A Dioxus front end for the Jobly job board: browse companies and job
//! postings, sign up or log in, apply to jobs and edit your profile.
//!
//! ## Overview
//!
//! The crate is split the same way the app is layered:
//!
//! - **Shared types** (`JoblyConfig`, `User`, `Company`, `Job`, `ApiError`)
//! - **Client plumbing** (`client`): REST client, token persistence, JWT
//!   payload decoding, the session manager and route guard predicates
//! - **Views** (`views`): pages and widgets, plus the plain functions they
//!   render from
//! - **App** (`app`): the route table and the root component
//!
//! Everything below the views is renderer-agnostic. The session manager
//! only needs a [`client::Transport`] and a [`client::KeyValueStore`], which
//! is how the tests drive it without a browser or a backend.
//!
//! ## Features
//!
//! ### `web`
//!
//! Enables the browser renderer and the `jobly` binary.
//!
//! ```toml
//! [dependencies]
//! jobly = { path = "../jobly", features = ["web"] }
//! ```
//!
//! ## Configuration
//!
//! The backend URL is baked in at compile time from `JOBLY_BASE_URL`
//! (see `build.rs`), falling back to `http://localhost:3001`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jobly::client::{JoblyApi, ReqwestTransport};
//! use jobly::JoblyConfig;
//!
//! let api = JoblyApi::new(ReqwestTransport::new(), &JoblyConfig::from_env());
//! let jobs = api.get_jobs(Some("engineer")).await?;
//! ```
//!
//! ## Platform Compatibility
//!
//! | Piece | WASM (browser) | Native |
//! |-------|----------------|--------|
//! | HTTP client | ✅ | ✅ |
//! | Token storage | `localStorage` | in-memory |
//! | Views | ✅ | ✅ (renderer of your choice) |

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod user;
pub mod views;

#[cfg(test)]
mod test_support;

pub use app::{App, Route};
pub use config::JoblyConfig;
pub use error::{ApiError, SessionError, TokenDecodeError};
pub use models::{Company, Job, LoginCredentials, ProfileUpdate, SignupData};
pub use user::{JobId, User};
