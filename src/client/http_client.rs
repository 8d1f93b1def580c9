//! Authentication-aware HTTP client for the Jobly backend.
//!
//! [`JoblyApi`] builds requests, attaches the bearer token and unwraps the
//! backend's response envelopes. The wire itself sits behind [`Transport`] so
//! the session logic can run against a stub; [`ReqwestTransport`] is the real
//! one and works both in the browser and natively.
//!
//! Every failure comes back as an [`ApiError`]: a list of messages ready to
//! show to the user.

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::config::JoblyConfig;
use crate::error::ApiError;
use crate::models::{Company, Job, LoginCredentials, ProfileUpdate, SignupData};
use crate::user::{JobId, User};

/// HTTP verbs used by the backend API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    /// Read-style calls carry their payload as query parameters.
    pub fn is_read(self) -> bool {
        matches!(self, Method::Get)
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        })
    }
}

/// A fully built request, ready for a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint relative to the base URL (e.g., "companies/apple").
    pub endpoint: String,
    /// Absolute URL.
    pub url: String,
    /// Query parameters (read-style calls only).
    pub query: Vec<(String, String)>,
    /// JSON body (write-style calls only).
    pub body: Option<Value>,
    /// Bearer token for the `Authorization` header.
    pub bearer: Option<String>,
}

/// Sends [`ApiRequest`]s and returns the decoded JSON body.
///
/// Implementations must normalize every failure into an [`ApiError`].
pub trait Transport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Value, ApiError>>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client (custom headers, timeouts, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.as_reqwest(), &request.url);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        } else {
            tracing::trace!("No auth token set - sending unauthenticated request");
        }

        builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder.query(&request.query),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", request.url, e);
            ApiError::generic()
        })?;

        let status = response.status();
        tracing::trace!("{} {} -> {}", request.method, request.url, status);

        if status.is_success() {
            response.json::<Value>().await.map_err(|e| {
                tracing::error!("Failed to parse response from {}: {}", request.url, e);
                ApiError::generic()
            })
        } else {
            let body = response.json::<Value>().await.unwrap_or_default();
            let error = ApiError::from_body(&body);
            tracing::warn!("{} {} rejected ({}): {}", request.method, request.url, status, error);
            Err(error)
        }
    }
}

/// The bearer token shared between the session and the API client.
pub type SharedToken = Rc<RefCell<Option<String>>>;

/// Client for the Jobly REST API.
///
/// Clones share the transport and the token.
pub struct JoblyApi<T> {
    transport: Rc<T>,
    config: Rc<JoblyConfig>,
    token: SharedToken,
}

impl<T> Clone for JoblyApi<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
            config: Rc::clone(&self.config),
            token: Rc::clone(&self.token),
        }
    }
}

impl<T> fmt::Debug for JoblyApi<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoblyApi")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.token.borrow().is_some())
            .finish()
    }
}

#[derive(Deserialize)]
struct CompaniesEnvelope {
    companies: Vec<Company>,
}

#[derive(Deserialize)]
struct CompanyEnvelope {
    company: Company,
}

#[derive(Deserialize)]
struct JobsEnvelope {
    jobs: Vec<Job>,
}

#[derive(Deserialize)]
struct TokenEnvelope {
    token: String,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct AppliedEnvelope {
    applied: JobId,
}

impl<T: Transport> JoblyApi<T> {
    /// Creates a client without a token.
    pub fn new(transport: T, config: &JoblyConfig) -> Self {
        Self {
            transport: Rc::new(transport),
            config: Rc::new(config.clone()),
            token: Rc::new(RefCell::new(None)),
        }
    }

    pub fn config(&self) -> &JoblyConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sets or clears the token sent with every subsequent request.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    /// Returns the token currently attached to requests.
    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Builds the request for `endpoint`.
    ///
    /// For reads, the non-null entries of a `payload` object become query
    /// parameters; for writes, the payload is the JSON body.
    pub fn build_request(&self, endpoint: &str, payload: Value, method: Method) -> ApiRequest {
        let (query, body) = if method.is_read() {
            (query_pairs(payload), None)
        } else {
            (Vec::new(), Some(payload))
        };

        ApiRequest {
            method,
            endpoint: endpoint.to_string(),
            url: self.config.endpoint_url(endpoint),
            query,
            body,
            bearer: self.token(),
        }
    }

    /// Issues one call and decodes the response body into `R`.
    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: Value,
        method: Method,
    ) -> Result<R, ApiError> {
        let request = self.build_request(endpoint, payload, method);
        let body = self.transport.send(request).await?;

        serde_json::from_value(body).map_err(|e| {
            tracing::error!("Unexpected response shape from {} {}: {}", method, endpoint, e);
            ApiError::generic()
        })
    }

    /// `GET /companies`, optionally filtered by name.
    pub async fn get_companies(&self, name: Option<&str>) -> Result<Vec<Company>, ApiError> {
        let payload = filter_payload("name", name);
        let envelope: CompaniesEnvelope = self.request("companies", payload, Method::Get).await?;
        Ok(envelope.companies)
    }

    /// `GET /companies/:handle`, including the company's jobs.
    pub async fn get_company(&self, handle: &str) -> Result<Company, ApiError> {
        let endpoint = format!("companies/{}", urlencoding::encode(handle));
        let envelope: CompanyEnvelope = self.request(&endpoint, empty(), Method::Get).await?;
        Ok(envelope.company)
    }

    /// `GET /jobs`, optionally filtered by title.
    pub async fn get_jobs(&self, title: Option<&str>) -> Result<Vec<Job>, ApiError> {
        let payload = filter_payload("title", title);
        let envelope: JobsEnvelope = self.request("jobs", payload, Method::Get).await?;
        Ok(envelope.jobs)
    }

    /// `POST /auth/token`; returns a signed token.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<String, ApiError> {
        let envelope: TokenEnvelope = self
            .request("auth/token", to_payload(credentials)?, Method::Post)
            .await?;
        Ok(envelope.token)
    }

    /// `POST /auth/register`; returns a signed token.
    pub async fn signup(&self, data: &SignupData) -> Result<String, ApiError> {
        let envelope: TokenEnvelope = self
            .request("auth/register", to_payload(data)?, Method::Post)
            .await?;
        Ok(envelope.token)
    }

    /// `GET /users/:username`, including applications.
    pub async fn get_current_user(&self, username: &str) -> Result<User, ApiError> {
        let endpoint = format!("users/{}", urlencoding::encode(username));
        let envelope: UserEnvelope = self.request(&endpoint, empty(), Method::Get).await?;
        Ok(envelope.user)
    }

    /// `PATCH /users/:username`; returns the saved profile.
    pub async fn save_profile(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let endpoint = format!("users/{}", urlencoding::encode(username));
        let envelope: UserEnvelope = self
            .request(&endpoint, to_payload(update)?, Method::Patch)
            .await?;
        Ok(envelope.user)
    }

    /// `POST /users/:username/jobs/:id`; returns the id the backend recorded.
    pub async fn apply_to_job(&self, username: &str, job_id: JobId) -> Result<JobId, ApiError> {
        let endpoint = format!("users/{}/jobs/{}", urlencoding::encode(username), job_id);
        let envelope: AppliedEnvelope = self.request(&endpoint, empty(), Method::Post).await?;
        Ok(envelope.applied)
    }
}

fn empty() -> Value {
    Value::Object(Map::new())
}

/// `{}` when there is no filter, `{ key: value }` otherwise.
fn filter_payload(key: &str, value: Option<&str>) -> Value {
    let mut map = Map::new();
    if let Some(value) = value {
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
    Value::Object(map)
}

fn to_payload<P: Serialize>(payload: &P) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| {
        tracing::error!("Failed to encode request payload: {}", e);
        ApiError::generic()
    })
}

/// Flattens an object payload into query parameters, skipping nulls.
fn query_pairs(payload: Value) -> Vec<(String, String)> {
    let Value::Object(map) = payload else {
        return Vec::new();
    };

    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((key, text)),
            other => Some((key, other.to_string())),
        })
        .collect()
}
