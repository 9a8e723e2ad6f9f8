//! Persistence of the granted credential.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::credential::Credential;

/// Why a persisted credential could not be loaded.
///
/// Every variant is recoverable: the caller falls back to interactive
/// acquisition.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no stored credential")]
    NotFound,

    #[error("stored credential is unreadable: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read stored credential: {0}")]
    Io(#[from] io::Error),
}

/// Load/save contract for the credential blob.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Credential, StoreError>;

    /// Replace any previously stored credential.
    fn save(&self, credential: &Credential) -> io::Result<()>;
}

/// Credential kept as a JSON file (`googletoken.json` by default).
///
/// Saving writes a sibling temp file and renames it over the target, so a
/// crash mid-write never leaves a truncated token behind.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub const DEFAULT_PATH: &'static str = "googletoken.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Credential, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, credential: &Credential) -> io::Result<()> {
        let json = serde_json::to_vec(credential)?;
        let tmp = self.temp_path();

        let written = write_synced(&tmp, &json).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        tracing::info!("Wrote credential to {}", self.path.display());
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn credential(token: &str) -> Credential {
        Credential {
            access_token: token.to_string(),
            refresh_token: Some("refresh".to_string()),
            scope: None,
            token_type: Some("Bearer".to_string()),
            expiry_date: Some(1_700_000_000_000),
        }
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("token.json"));
        assert!(matches!(store.load(), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, b"{not json").unwrap();
        let store = FileCredentialStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("token.json"));
        store.save(&credential("first")).unwrap();
        assert_eq!(store.load().unwrap(), credential("first"));
    }

    #[test]
    fn test_save_overwrites_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("token.json"));
        store.save(&credential("first")).unwrap();
        store.save(&credential("second")).unwrap();

        assert_eq!(store.load().unwrap().access_token, "second");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nope").join("token.json"));
        assert!(store.save(&credential("x")).is_err());
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        // A non-empty directory in the way makes the final rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), b"").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(store.save(&credential("x")).is_err());
        assert!(!dir.path().join("token.json.tmp").exists());
        assert!(path.is_dir());
    }
}
