//! Error types for the Liquidi API client.
//!
//! # Design
//! Every HTTP-level outcome that is not a success collapses into
//! `RequestFailed`, carrying only a human-readable message: the server's
//! JSON `message` when it sent one, otherwise `FALLBACK_MESSAGE`. Transport
//! failures land in the same variant. Callers display the message and
//! nothing else, so no status code or body is kept.

use thiserror::Error;

/// Message used when a failed response carries no usable `message` field.
pub const FALLBACK_MESSAGE: &str = "Erro na requisição";

/// Errors returned by `ApiClient`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response or transport failure.
    #[error("{0}")]
    RequestFailed(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A 2xx body did not match the type the caller asked for.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// The message a caller should show to the user.
    pub fn message(&self) -> String {
        match self {
            ApiError::RequestFailed(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors raised when persisting a credential.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
