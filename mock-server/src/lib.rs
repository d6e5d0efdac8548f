use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug)]
struct User {
    id: Uuid,
    name: String,
    email: String,
    company_name: String,
    cnpj: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub cnpj: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registered {
    pub id: Uuid,
    pub email: String,
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub cnpj: String,
}

#[derive(Default)]
struct Accounts {
    users: HashMap<String, User>,
    /// access token -> email
    sessions: HashMap<String, String>,
}

type Db = Arc<RwLock<Accounts>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Accounts::default()));
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/dashboard/summary", get(summary))
        .fallback(not_found)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "statusCode": status.as_u16(), "message": message }))).into_response()
}

async fn register(State(db): State<Db>, Json(input): Json<RegisterInput>) -> Response {
    let mut accounts = db.write().await;
    if accounts.users.contains_key(&input.email) {
        return error(StatusCode::CONFLICT, "E-mail já cadastrado");
    }
    let user = User {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        company_name: input.company_name,
        cnpj: input.cnpj,
        password: input.password,
    };
    let registered = Registered {
        id: user.id,
        email: user.email.clone(),
    };
    info!(email = %user.email, "user registered");
    accounts.users.insert(user.email.clone(), user);
    (StatusCode::CREATED, Json(registered)).into_response()
}

async fn login(State(db): State<Db>, Json(input): Json<LoginInput>) -> Response {
    let mut accounts = db.write().await;
    let valid = accounts
        .users
        .get(&input.email)
        .is_some_and(|user| user.password == input.password);
    if !valid {
        return error(StatusCode::UNAUTHORIZED, "Credenciais inválidas");
    }
    let token = Uuid::new_v4().to_string();
    accounts.sessions.insert(token.clone(), input.email);
    Json(AccessToken {
        access_token: token,
    })
    .into_response()
}

async fn summary(State(db): State<Db>, headers: HeaderMap) -> Response {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    let Some(token) = token else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };

    let accounts = db.read().await;
    let user = accounts
        .sessions
        .get(token)
        .and_then(|email| accounts.users.get(email));
    match user {
        Some(user) => Json(Summary {
            name: user.name.clone(),
            email: user.email.clone(),
            company_name: user.company_name.clone(),
            cnpj: user.cnpj.clone(),
        })
        .into_response(),
        None => error(StatusCode::UNAUTHORIZED, "Unauthorized"),
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
