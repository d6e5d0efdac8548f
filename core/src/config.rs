//! Client configuration read from the environment.

use std::env;
use std::path::PathBuf;

/// Base URL used when `LIQUIDI_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

pub const API_URL_ENV: &str = "LIQUIDI_API_URL";
pub const STORE_DIR_ENV: &str = "LIQUIDI_STORE_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin plus optional prefix that every request path is appended to.
    pub base_url: String,
    /// Directory holding per-origin credential files.
    pub store_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            store_dir: default_store_dir(),
        }
    }
}

impl ClientConfig {
    /// Build from `LIQUIDI_API_URL` and `LIQUIDI_STORE_DIR`. Unset or blank
    /// values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: non_empty_var(API_URL_ENV).unwrap_or(defaults.base_url),
            store_dir: non_empty_var(STORE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.store_dir),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// `<data dir>/liquidi`, or `./.liquidi` where the platform has no data dir.
pub fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("liquidi"))
        .unwrap_or_else(|| PathBuf::from(".liquidi"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        temp_env::with_vars(
            [(API_URL_ENV, None::<&str>), (STORE_DIR_ENV, None::<&str>)],
            || {
                let config = ClientConfig::from_env();
                assert_eq!(config.base_url, "http://localhost:3001");
                assert_eq!(config.store_dir, default_store_dir());
            },
        );
    }

    #[test]
    fn reads_env_values() {
        temp_env::with_vars(
            [
                (API_URL_ENV, Some("https://api.liquidi.com.br")),
                (STORE_DIR_ENV, Some("/tmp/liquidi-store")),
            ],
            || {
                let config = ClientConfig::from_env();
                assert_eq!(config.base_url, "https://api.liquidi.com.br");
                assert_eq!(config.store_dir, PathBuf::from("/tmp/liquidi-store"));
            },
        );
    }

    #[test]
    fn blank_values_fall_back() {
        temp_env::with_vars([(API_URL_ENV, Some("  "))], || {
            assert_eq!(ClientConfig::from_env().base_url, DEFAULT_API_URL);
        });
    }
}
