//! Authenticated JSON client for the Liquidi API.
//!
//! # Overview
//! Builds requests against a configured base URL, attaches the bearer token
//! from a `CredentialStore` when one is present, and normalizes every
//! failure into `ApiError::RequestFailed` carrying a display message.
//!
//! # Design
//! - `ApiClient` is stateless beyond its base URL; the token store is read
//!   on every request and never written by the client.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`),
//!   so the client can be exercised without a network. `UreqTransport`
//!   performs real I/O.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, StoreError, FALLBACK_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use store::{CredentialStore, FileStore, MemoryStore, NoStore, TOKEN_KEY};
pub use transport::{Transport, UreqTransport};
pub use types::{LoginRequest, RegisterRequest, TokenResponse};
