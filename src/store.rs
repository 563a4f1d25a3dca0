// Token persistence. The token manager only needs "get the one record" and
// "replace the one record", so storage sits behind the `TokenStore` trait:
// the app uses a JSON file, tests use `MemoryStore`.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key under which the credential lives inside the store file.
pub const AUTH_KEY: &str = "auth";

/// A client-credentials access token plus the moment it was obtained.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Credential {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds, counted from `created_at`.
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Seconds since the Unix epoch.
    pub created_at: f64,
}

impl Credential {
    pub fn is_valid_at(&self, now: f64) -> bool {
        now < self.created_at + self.expires_in as f64
    }
}

pub trait TokenStore: Send + Sync {
    fn get(&self) -> Result<Option<Credential>, StoreError>;
    /// Replace the stored credential.
    fn put(&self, credential: &Credential) -> Result<(), StoreError>;
}

/// File-backed store: a JSON object holding the credential under `"auth"`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`; the file and its directory are
    /// created on the first `put`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds the store file (and its temp files).
    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl TokenStore for JsonFileStore {
    fn get(&self) -> Result<Option<Credential>, StoreError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // A damaged file is treated as empty; the next refresh rewrites it.
        match serde_json::from_str::<HashMap<String, Credential>>(&data) {
            Ok(mut map) => Ok(map.remove(AUTH_KEY)),
            Err(e) => {
                log::warn!("ignoring unreadable token store {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn put(&self, credential: &Credential) -> Result<(), StoreError> {
        let dir = self.dir();
        std::fs::create_dir_all(dir)?;

        let mut map = HashMap::new();
        map.insert(AUTH_KEY, credential);
        let data = serde_json::to_string_pretty(&map)?;

        // Each write gets its own 0600 temp file next to the target, then is
        // renamed over it: readers see the old or the new record, and
        // concurrent writers never share a temp file.
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(data.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Mutex::new(Some(credential)),
        }
    }
}

impl TokenStore for MemoryStore {
    fn get(&self) -> Result<Option<Credential>, StoreError> {
        let slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(slot.clone())
    }

    fn put(&self, credential: &Credential) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(credential.clone());
        Ok(())
    }
}

impl<S: TokenStore + ?Sized> TokenStore for std::sync::Arc<S> {
    fn get(&self) -> Result<Option<Credential>, StoreError> {
        (**self).get()
    }

    fn put(&self, credential: &Credential) -> Result<(), StoreError> {
        (**self).put(credential)
    }
}
