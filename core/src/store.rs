//! Credential stores holding the bearer token.
//!
//! # Design
//! The token is shared, ambient state: written once by whoever completes a
//! login, read by every request. `ApiClient` receives a `CredentialStore`
//! explicitly and only ever calls `get`. A lookup never fails; anything
//! that prevents reading the token reads as "no token".

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::error::StoreError;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "liquidi_token";

/// Read/write access to the bearer token.
pub trait CredentialStore {
    /// Current token, or `None` when absent or unreadable.
    fn get(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value.
    fn set(&self, token: &str) -> Result<(), StoreError>;
}

impl<S: CredentialStore + ?Sized> CredentialStore for &S {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        (**self).set(token)
    }
}

impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        (**self).set(token)
    }
}

/// Store for environments without a session: never holds a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl CredentialStore for NoStore {
    fn get(&self) -> Option<String> {
        None
    }

    fn set(&self, _token: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-process store, safe to share between threads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        // Poisoning cannot leave a partially written `Option<String>`.
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.to_string());
        Ok(())
    }
}

/// Per-origin key-value file, the on-disk analogue of browser local storage.
///
/// The file is a flat JSON object of string values. Keys other than
/// `TOKEN_KEY` are preserved on write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `origin` (e.g. `http://localhost:3001`) inside `dir`.
    pub fn for_origin(dir: &Path, origin: &str) -> Self {
        Self::new(dir.join(format!("{}.json", origin_slug(origin))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(TOKEN_KEY),
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring unreadable credential store: {e}");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking a fresh login.
        let mut entries = self.load().unwrap_or_default();
        entries.insert(TOKEN_KEY.to_string(), token.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// File-name-safe form of an origin: `http://localhost:3001` becomes
/// `http_localhost_3001`.
fn origin_slug(origin: &str) -> String {
    let slug: String = origin
        .trim_end_matches('/')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    let mut out = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}
