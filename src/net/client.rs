//! Single point of origin for backend HTTP calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call from `net::api` goes through `HttpClient::send`, which runs
//! two interceptors around the transport:
//!
//! - request: attach `Authorization: Bearer <token>` when a token is stored
//! - response: map non-2xx to `ApiError`; on 401 (subject to the configured
//!   `UnauthorizedPolicy`) emit an `UnauthorizedEvent` before returning the
//!   error to the caller
//!
//! The client reads the credential store but never writes it.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::signal::{UnauthorizedEvent, UnauthorizedSignal};
use super::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
use super::types::ErrorEnvelope;
use crate::config::{ConsoleConfig, UnauthorizedPolicy};
use crate::state::credentials::CredentialStore;

/// Endpoints reachable without a token.
pub const PUBLIC_ENDPOINTS: [&str; 3] = ["/api/admin/login", "/api/customer/login", "/api/customer/signup"];

const UNAUTHORIZED: u16 = 401;

#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    default_headers: Vec<(String, String)>,
    transport: Arc<dyn Transport>,
    credentials: CredentialStore,
    unauthorized: UnauthorizedSignal,
    policy: UnauthorizedPolicy,
}

impl HttpClient {
    pub fn new(
        config: &ConsoleConfig,
        transport: Arc<dyn Transport>,
        credentials: CredentialStore,
        unauthorized: UnauthorizedSignal,
    ) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            default_headers: vec![
                ("Content-Type".to_owned(), "application/json".to_owned()),
                ("Accept".to_owned(), "application/json".to_owned()),
            ],
            transport,
            credentials,
            unauthorized,
            policy: config.unauthorized_policy,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn unauthorized_signal(&self) -> &UnauthorizedSignal {
        &self.unauthorized
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(HttpMethod::Get, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.send(HttpMethod::Post, path, Some(body)).await
    }

    /// POST without a request body (state transitions such as approve).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(HttpMethod::Post, path, None).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.send(HttpMethod::Put, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(HttpMethod::Delete, path, None).await
    }

    async fn send<T: DeserializeOwned>(&self, method: HttpMethod, path: &str, body: Option<String>) -> Result<T, ApiError> {
        let request = self.intercept_request(method, path, body);
        log::debug!("{} {}", method.as_str(), request.url);
        let response = self.transport.send(request).await?;
        let body = self.intercept_response(path, response)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Resolve the URL and apply default headers plus the bearer token.
    fn intercept_request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = self.default_headers.clone();
        if let Some(token) = self.credentials.token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        HttpRequest { method, url: format!("{}{path}", self.base_url), headers, body }
    }

    /// Pass 2xx bodies through; turn everything else into `ApiError::Status`.
    fn intercept_response(&self, path: &str, response: HttpResponse) -> Result<String, ApiError> {
        if response.is_success() {
            return Ok(response.body);
        }
        let message = serde_json::from_str::<ErrorEnvelope>(&response.body)
            .ok()
            .and_then(|envelope| envelope.message);

        if response.status == UNAUTHORIZED {
            let path = strip_query(path);
            if signals_unauthorized(self.policy, path) {
                log::warn!("401 from {path}; signalling sign-out");
                self.unauthorized.emit(&UnauthorizedEvent { path: path.to_owned() });
            } else {
                log::debug!("401 from public endpoint {path} left to caller");
            }
        }

        Err(ApiError::Status { status: response.status, message })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Whether a 401 from `path` triggers the global sign-out under `policy`.
pub fn signals_unauthorized(policy: UnauthorizedPolicy, path: &str) -> bool {
    match policy {
        UnauthorizedPolicy::Global => true,
        UnauthorizedPolicy::ProtectedOnly => !PUBLIC_ENDPOINTS.contains(&strip_query(path)),
    }
}

fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(p, _)| p)
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}
