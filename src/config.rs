//! Backend configuration for the Jobly client.
//!
//! The only setting is the base address of the REST backend. It is baked in
//! at compile time from `JOBLY_BASE_URL` (see `build.rs`) because wasm builds
//! have no process environment to read at runtime.

use serde::{Deserialize, Serialize};

/// Backend address used when `JOBLY_BASE_URL` is not set at compile time.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Configuration for the Jobly API client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoblyConfig {
    /// Base URL of the backend, without a trailing slash
    /// (e.g., "https://jobly-backend.example.com").
    pub base_url: String,
}

impl Default for JoblyConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl JoblyConfig {
    /// Creates a config pointing at the given backend.
    ///
    /// # Example
    ///
    /// ```
    /// # use jobly::JoblyConfig;
    /// let config = JoblyConfig::new("https://api.jobly.dev/");
    /// assert_eq!(config.base_url, "https://api.jobly.dev");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Loads the config from compile-time environment variables.
    ///
    /// Falls back to [`DEFAULT_BASE_URL`] when `JOBLY_BASE_URL` is unset or blank.
    pub fn from_env() -> Self {
        match option_env!("JOBLY_BASE_URL").map(str::trim) {
            Some(url) if !url.is_empty() => {
                tracing::trace!("Using JOBLY_BASE_URL override: {}", url);
                Self::new(url)
            }
            _ => {
                tracing::trace!("JOBLY_BASE_URL not set, using {}", DEFAULT_BASE_URL);
                Self::default()
            }
        }
    }

    /// Builds the absolute URL for an endpoint relative to the base URL.
    ///
    /// # Example
    ///
    /// ```
    /// # use jobly::JoblyConfig;
    /// let config = JoblyConfig::new("http://localhost:3001");
    /// assert_eq!(config.endpoint_url("/companies"), "http://localhost:3001/companies");
    /// ```
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}
