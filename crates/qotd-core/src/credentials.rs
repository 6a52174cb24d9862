//! Bearer credential storage and retrieval.
//!
//! Stores the session token in `${QOTD_HOME}/credentials.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Persisted credential record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredential {
    /// Credential type (always "bearer").
    #[serde(rename = "type")]
    cred_type: String,
    /// The opaque access token issued by the service.
    token: String,
}

/// File-backed store for the single bearer credential slot.
///
/// Reads fail silently (absent), writes are synchronous, clears are
/// idempotent. The path is injectable so tests can isolate the slot.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Creates a store at the default credential path.
    pub fn new() -> Self {
        Self {
            path: paths::credentials_path(),
        }
    }

    /// Creates a store at a specific path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the persisted token, if any.
    ///
    /// Returns `None` when the file is missing, unreadable, malformed, or
    /// holds an empty token. Never surfaces an error to the caller; real
    /// failures are logged at warn.
    pub fn get(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read credential file");
                return None;
            }
        };

        let stored: StoredCredential = match serde_json::from_str(&contents) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to parse credential file");
                return None;
            }
        };

        if stored.token.is_empty() {
            return None;
        }
        Some(stored.token)
    }

    /// Persists the token, replacing any previous value.
    ///
    /// Written with restricted permissions (0600) on unix.
    pub fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let stored = StoredCredential {
            cred_type: "bearer".to_string(),
            token: token.to_string(),
        };
        let contents =
            serde_json::to_string_pretty(&stored).context("Failed to serialize credential")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the persisted token. Clearing an absent value is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= 12 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(8).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, CredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(dir.path().join("credentials.json"));
        (dir, store)
    }

    #[test]
    fn test_get_missing_file_is_absent() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let (_dir, store) = temp_store();
        store.set("tok1").unwrap();
        assert_eq!(store.get(), Some("tok1".to_string()));
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let (_dir, store) = temp_store();
        store.set("tok1").unwrap();
        store.set("tok2").unwrap();
        assert_eq!(store.get(), Some("tok2".to_string()));
    }

    #[test]
    fn test_get_corrupt_file_is_absent() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("credentials.json"), "not json").unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_get_empty_token_is_absent() {
        let (dir, store) = temp_store();
        std::fs::write(
            dir.path().join("credentials.json"),
            r#"{"type":"bearer","token":""}"#,
        )
        .unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (_dir, store) = temp_store();
        store.clear().unwrap();
        store.set("tok1").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_set_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, store) = temp_store();
        store.set("tok1").unwrap();

        let meta = std::fs::metadata(dir.path().join("credentials.json")).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("a-rather-long-bearer-token"), "a-rather...");
        assert_eq!(mask_token("short"), "***");
        // Tokens are opaque; a multibyte char near the cut must not panic.
        assert_eq!(mask_token("ééééééééééééééé"), "éééééééé...");
    }
}
