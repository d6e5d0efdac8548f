//! Wire DTOs for the Liquidi auth endpoints.
//!
//! These mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates. Input is assumed
//! to be validated by whoever collects it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub company_name: String,
    /// Fourteen digits, no punctuation.
    pub cnpj: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Shape of a failure body. Only `message` is read; anything else the
/// server sends is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Value,
}

impl ErrorBody {
    /// The user-facing message, if the server sent a usable one.
    ///
    /// Validation errors often arrive as a list of strings; those are
    /// joined with commas. Non-zero numbers and `true` are stringified.
    /// Empty strings, empty lists, `0`, `false`, `null` and objects count
    /// as absent.
    pub fn message(&self) -> Option<String> {
        match &self.message {
            Value::String(message) if !message.is_empty() => Some(message.clone()),
            Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            Value::Array(items) if !items.is_empty() => Some(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            _ => None,
        }
    }
}
