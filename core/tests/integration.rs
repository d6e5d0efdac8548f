//! Auth flow against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `ApiClient` over
//! real HTTP with `UreqTransport`. The login step writes the token into a
//! shared store the same way an interactive caller would.

use std::sync::Arc;
use std::thread;

use liquidi_core::{
    ApiClient, ApiError, CredentialStore, FileStore, LoginRequest, MemoryStore, RegisterRequest,
    RequestOptions, UreqTransport, FALLBACK_MESSAGE,
};
use serde_json::Value;

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn joao() -> RegisterRequest {
    RegisterRequest {
        name: "João Silva".to_string(),
        email: "joao@empresa.com".to_string(),
        company_name: "Empresa LTDA".to_string(),
        cnpj: "12345678000190".to_string(),
        password: "123456".to_string(),
    }
}

fn credentials(password: &str) -> LoginRequest {
    LoginRequest {
        email: "joao@empresa.com".to_string(),
        password: password.to_string(),
    }
}

#[test]
fn auth_lifecycle() {
    let base_url = start_server();
    let store = Arc::new(MemoryStore::new());
    let client = ApiClient::new(&base_url, Arc::clone(&store), UreqTransport::new());

    // Step 1: unauthenticated summary is rejected with the server's message.
    let err = client
        .fetch::<Value>("/dashboard/summary", RequestOptions::get())
        .unwrap_err();
    assert_eq!(err, ApiError::RequestFailed("Unauthorized".to_string()));

    // Step 2: login before registering.
    let err = client.login(&credentials("123456")).unwrap_err();
    assert_eq!(err.to_string(), "Credenciais inválidas");

    // Step 3: register, then a duplicate.
    let created = client.register(&joao()).unwrap();
    assert_eq!(created["email"], "joao@empresa.com");
    let err = client.register(&joao()).unwrap_err();
    assert_eq!(err.message(), "E-mail já cadastrado");

    // Step 4: wrong password.
    let err = client.login(&credentials("wrong!")).unwrap_err();
    assert_eq!(err.message(), "Credenciais inválidas");

    // Step 5: login does not touch the store; the caller writes it.
    let token = client.login(&credentials("123456")).unwrap();
    assert!(store.get().is_none());
    store.set(&token.access_token).unwrap();

    // Step 6: the summary now goes through with the stored token.
    let summary: Value = client
        .fetch("/dashboard/summary", RequestOptions::get())
        .unwrap();
    assert_eq!(summary["companyName"], "Empresa LTDA");
    assert_eq!(summary["cnpj"], "12345678000190");

    // Step 7: a caller-supplied Authorization wins over the stored token.
    let err = client
        .fetch::<Value>(
            "/dashboard/summary",
            RequestOptions::get().header("authorization", "Bearer forged"),
        )
        .unwrap_err();
    assert_eq!(err.message(), "Unauthorized");

    // Step 8: an empty 404 body falls back to the generic message.
    let err = client
        .fetch::<Value>("/reports/cashflow", RequestOptions::get())
        .unwrap_err();
    assert_eq!(err, ApiError::RequestFailed(FALLBACK_MESSAGE.to_string()));
}

#[test]
fn concurrent_calls_are_independent() {
    let base_url = start_server();
    let store = Arc::new(MemoryStore::new());
    let client = Arc::new(ApiClient::new(&base_url, Arc::clone(&store), UreqTransport::new()));

    client.register(&joao()).unwrap();
    let token = client.login(&credentials("123456")).unwrap();
    store.set(&token.access_token).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                client
                    .fetch::<Value>("/dashboard/summary", RequestOptions::get())
                    .map(|summary| summary["email"].clone())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), "joao@empresa.com");
    }
}

#[test]
fn token_persisted_to_file_is_used_by_a_fresh_client() {
    let base_url = start_server();
    let dir = tempfile::tempdir().unwrap();

    let first = ApiClient::new(&base_url, FileStore::for_origin(dir.path(), &base_url), UreqTransport::new());
    first.register(&joao()).unwrap();
    let token = first.login(&credentials("123456")).unwrap();
    first.store().set(&token.access_token).unwrap();

    let second = ApiClient::new(&base_url, FileStore::for_origin(dir.path(), &base_url), UreqTransport::new());
    let summary: Value = second
        .fetch("/dashboard/summary", RequestOptions::get())
        .unwrap();
    assert_eq!(summary["name"], "João Silva");
}

#[test]
fn unreachable_server_is_a_request_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::new(
        &format!("http://127.0.0.1:{port}"),
        MemoryStore::new(),
        UreqTransport::new(),
    );
    let err = client.fetch::<Value>("/auth/login", RequestOptions::post()).unwrap_err();
    assert!(matches!(err, ApiError::RequestFailed(_)));
}
