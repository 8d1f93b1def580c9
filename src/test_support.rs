//! Shared fixtures for unit tests: a scripted transport and token helpers.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::client::http_client::{ApiRequest, JoblyApi, Method, Transport};
use crate::client::session::{Session, SessionManager};
use crate::client::token_storage::{MemoryStorage, TokenStorage};
use crate::config::JoblyConfig;
use crate::error::ApiError;

/// Transport that answers from a table keyed by method and endpoint and
/// records every request it sees.
#[derive(Default)]
pub(crate) struct StubTransport {
    routes: RefCell<HashMap<(Method, String), Result<Value, ApiError>>>,
    calls: RefCell<Vec<ApiRequest>>,
    yielding: Cell<bool>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, method: Method, endpoint: &str, body: Value) {
        self.routes
            .borrow_mut()
            .insert((method, endpoint.to_string()), Ok(body));
    }

    pub(crate) fn reject(&self, method: Method, endpoint: &str, messages: &[&str]) {
        let error = ApiError::new(messages.iter().map(|m| m.to_string()).collect());
        self.routes
            .borrow_mut()
            .insert((method, endpoint.to_string()), Err(error));
    }

    /// Makes every later request suspend once before answering, so other
    /// futures in the same `join!` run while it is in flight.
    pub(crate) fn yield_before_reply(&self) {
        self.yielding.set(true);
    }

    pub(crate) fn calls(&self) -> Vec<ApiRequest> {
        self.calls.borrow().clone()
    }

    pub(crate) fn calls_to(&self, method: Method, endpoint: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.method == method && call.endpoint == endpoint)
            .count()
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let key = (request.method, request.endpoint.clone());
        self.calls.borrow_mut().push(request);

        if self.yielding.get() {
            tokio::task::yield_now().await;
        }

        let response = self.routes.borrow().get(&key).cloned();
        response.unwrap_or_else(|| Err(ApiError::message(format!("No stub for {} {}", key.0, key.1))))
    }
}

/// Builds an unsigned token carrying a `username` claim.
pub(crate) fn make_token(username: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({ "username": username, "isAdmin": false, "iat": 1_700_000_000 })
            .to_string()
            .as_bytes(),
    );
    format!("{}.{}.signature", header, payload)
}

/// `GET /users/:username` response body.
pub(crate) fn user_body(username: &str, applications: &[u64]) -> Value {
    json!({
        "user": {
            "username": username,
            "firstName": "Test",
            "lastName": "User",
            "email": "test@example.com",
            "isAdmin": false,
            "applications": applications,
        }
    })
}

pub(crate) type TestSession = SessionManager<StubTransport, MemoryStorage, Rc<RefCell<Session>>>;

/// A session whose storage already holds `token` (if any).
pub(crate) fn session_with_token(token: Option<&str>) -> (TestSession, MemoryStorage) {
    let memory = MemoryStorage::new();
    let storage = TokenStorage::new(memory.clone());
    storage.store(token);

    let api = JoblyApi::new(StubTransport::new(), &JoblyConfig::new("http://backend.test"));
    let session = SessionManager::new(api, storage, Rc::new(RefCell::new(Session::default())));
    (session, memory)
}
