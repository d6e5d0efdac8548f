use anyhow::{bail, Context, Result};
use liquidi_core::{
    ApiClient, ClientConfig, CredentialStore, FileStore, LoginRequest, RegisterRequest,
    RequestOptions, TokenResponse,
};
use serde_json::Value;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Login {
        config: ClientConfig,
        input: LoginRequest,
    },
    Register {
        config: ClientConfig,
        input: RegisterRequest,
    },
    Fetch {
        config: ClientConfig,
        path: String,
        options: RequestOptions,
    },
}

fn client(config: &ClientConfig) -> ApiClient<FileStore> {
    let store = FileStore::for_origin(&config.store_dir, &config.base_url);
    ApiClient::from_config(config, store)
}

/// Persist the token from a login response. An empty token is rejected and
/// leaves the store as it was.
pub fn store_token<S: CredentialStore>(store: &S, token: &TokenResponse) -> Result<()> {
    if token.access_token.is_empty() {
        bail!("login response carried no access token");
    }
    store.set(&token.access_token)?;
    Ok(())
}

/// Execute the action, printing its outcome to stdout.
pub fn handle(action: Action) -> Result<()> {
    match action {
        Action::Login { config, input } => {
            let client = client(&config);
            let token = client.login(&input)?;
            store_token(client.store(), &token).with_context(|| {
                format!("storing token in {}", client.store().path().display())
            })?;
            info!(email = %input.email, "logged in");
            println!("Logged in as {}", input.email);
        }
        Action::Register { config, input } => {
            client(&config).register(&input)?;
            println!("Account created for {}", input.email);
        }
        Action::Fetch {
            config,
            path,
            options,
        } => {
            let value: Value = client(&config).fetch(&path, options)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}
