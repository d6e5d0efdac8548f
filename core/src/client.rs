//! Authenticated request builder and response parser for the Liquidi API.
//!
//! # Design
//! `ApiClient` holds a base URL, a credential store it only reads, and a
//! transport. Each call is split into `build_request` (pure, apart from the
//! token read) and `parse_response` (pure), with `fetch` composing the two
//! around one `Transport::execute`. Nothing is cached between calls, so
//! independent callers can share a client freely.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, FALLBACK_MESSAGE};
use crate::http::{HttpRequest, HttpResponse, RequestOptions};
use crate::store::CredentialStore;
use crate::transport::{Transport, UreqTransport};
use crate::types::{ErrorBody, LoginRequest, RegisterRequest, TokenResponse};

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ApiClient<S, T = UreqTransport> {
    base_url: String,
    store: S,
    transport: T,
}

impl<S: CredentialStore> ApiClient<S, UreqTransport> {
    /// Client for `config.base_url` over a default `ureq` transport.
    pub fn from_config(config: &ClientConfig, store: S) -> Self {
        Self::new(&config.base_url, store, UreqTransport::new())
    }
}

impl<S: CredentialStore, T: Transport> ApiClient<S, T> {
    pub fn new(base_url: &str, store: S, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build the request for `path` with merged headers.
    ///
    /// Precedence, lowest first: `Content-Type: application/json`, then
    /// `Authorization: Bearer <token>` when the store has a non-empty token, then the
    /// caller's headers. Names compare case-insensitively.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = vec![(CONTENT_TYPE.to_string(), JSON_MEDIA_TYPE.to_string())];
        if let Some(token) = self.store.get().filter(|token| !token.is_empty()) {
            headers.push((AUTHORIZATION.to_string(), format!("Bearer {token}")));
        }
        for (name, value) in options.headers {
            set_header(&mut headers, name, value);
        }

        HttpRequest {
            method: options.method,
            url: format!("{}{path}", self.base_url),
            headers,
            body: options.body,
        }
    }

    /// Turn a response into the caller's expected type or a normalized
    /// failure.
    pub fn parse_response<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        if !response.is_success() {
            return Err(ApiError::RequestFailed(failure_message(&response.body)));
        }
        // No content decodes as `null`, which `()`, `Option<_>` and `Value` accept.
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Execute one authenticated call against `<base_url><path>`.
    pub fn fetch<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R, ApiError> {
        let request = self.build_request(path, options);
        let response = self.transport.execute(&request)?;
        self.parse_response(response)
    }

    /// `POST /auth/login`. The caller decides whether to persist the token.
    pub fn login(&self, input: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.fetch("/auth/login", RequestOptions::post().json(input)?)
    }

    /// `POST /auth/register`. The response body is returned as-is.
    pub fn register(&self, input: &RegisterRequest) -> Result<Value, ApiError> {
        self.fetch("/auth/register", RequestOptions::post().json(input)?)
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: String, value: String) {
    headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
    headers.push((name, value));
}

/// Server-provided `message` if the body is a JSON object carrying one,
/// `FALLBACK_MESSAGE` otherwise.
fn failure_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .filter(Value::is_object)
        .and_then(|value| serde_json::from_value::<ErrorBody>(value).ok())
        .and_then(|err| err.message())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
