use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::ArgMatches;
use liquidi_core::{
    config::default_store_dir, ClientConfig, HttpMethod, LoginRequest, RegisterRequest,
    RequestOptions,
};

use crate::actions::Action;

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: --{id}"))
}

fn config(matches: &ArgMatches) -> Result<ClientConfig> {
    Ok(ClientConfig {
        base_url: required(matches, "api-url")?,
        store_dir: matches
            .get_one::<String>("store-dir")
            .map(PathBuf::from)
            .unwrap_or_else(default_store_dir),
    })
}

/// Parse a `Name: value` header argument.
fn parse_header(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once(':') else {
        bail!("invalid header {raw:?}, expected 'Name: value'");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("invalid header {raw:?}, empty name");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("login", sub)) => Ok(Action::Login {
            config: config(sub)?,
            input: LoginRequest {
                email: required(sub, "email")?,
                password: required(sub, "password")?,
            },
        }),
        Some(("register", sub)) => Ok(Action::Register {
            config: config(sub)?,
            input: RegisterRequest {
                name: required(sub, "name")?,
                email: required(sub, "email")?,
                company_name: required(sub, "company-name")?,
                cnpj: required(sub, "cnpj")?,
                password: required(sub, "password")?,
            },
        }),
        Some(("fetch", sub)) => {
            let method: HttpMethod = required(sub, "method")?
                .parse()
                .map_err(|e: String| anyhow!(e))?;
            let mut options = RequestOptions::new(method);
            if let Some(data) = sub.get_one::<String>("data") {
                options = options.body(data.as_str());
            }
            for raw in sub.get_many::<String>("header").into_iter().flatten() {
                let (name, value) = parse_header(raw)?;
                options = options.header(name, value);
            }
            Ok(Action::Fetch {
                config: config(sub)?,
                path: required(sub, "path")?,
                options,
            })
        }
        _ => bail!("no subcommand given"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands;

    fn dispatch(args: &[&str]) -> Result<Action> {
        temp_env::with_vars(
            [
                ("LIQUIDI_API_URL", None::<&str>),
                ("LIQUIDI_STORE_DIR", Some("/tmp/liquidi-test")),
                ("LIQUIDI_LOG_LEVEL", None::<&str>),
            ],
            || handler(&commands::new().get_matches_from(args.iter().copied())),
        )
    }

    #[test]
    fn login_action() {
        let action = dispatch(&["liquidi", "login", "--email", "a@b.com", "--password", "123456"]).unwrap();
        assert_eq!(
            action,
            Action::Login {
                config: ClientConfig {
                    base_url: "http://localhost:3001".to_string(),
                    store_dir: PathBuf::from("/tmp/liquidi-test"),
                },
                input: LoginRequest {
                    email: "a@b.com".to_string(),
                    password: "123456".to_string(),
                },
            }
        );
    }

    #[test]
    fn register_action() {
        let action = dispatch(&[
            "liquidi",
            "--api-url",
            "https://api.liquidi.com.br",
            "register",
            "--name",
            "Ana",
            "--email",
            "ana@x.com",
            "--company-name",
            "X LTDA",
            "--cnpj",
            "12345678000190",
            "--password",
            "123456",
        ])
        .unwrap();
        let Action::Register { config, input } = action else {
            panic!("expected register action");
        };
        assert_eq!(config.base_url, "https://api.liquidi.com.br");
        assert_eq!(input.company_name, "X LTDA");
    }

    #[test]
    fn fetch_action_builds_options() {
        let action = dispatch(&[
            "liquidi",
            "fetch",
            "/auth/login",
            "-X",
            "post",
            "-d",
            r#"{"email":"a@b.com","password":"123456"}"#,
            "-H",
            "Content-Type: text/plain",
        ])
        .unwrap();
        let Action::Fetch { path, options, .. } = action else {
            panic!("expected fetch action");
        };
        assert_eq!(path, "/auth/login");
        assert_eq!(options.method, HttpMethod::Post);
        assert_eq!(options.body.as_deref(), Some(r#"{"email":"a@b.com","password":"123456"}"#));
        assert_eq!(
            options.headers,
            vec![("Content-Type".to_string(), "text/plain".to_string())]
        );
    }

    #[test]
    fn fetch_rejects_unknown_method() {
        let err = dispatch(&["liquidi", "fetch", "/x", "-X", "TRACE"]).unwrap_err();
        assert!(err.to_string().contains("TRACE"));
    }

    #[test]
    fn header_parsing() {
        assert_eq!(
            parse_header("Authorization: Bearer abc").unwrap(),
            ("Authorization".to_string(), "Bearer abc".to_string())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }
}
