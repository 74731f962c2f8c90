//! Token cache backed by a JSON file.

use crate::error::Result;
use crate::token::Token;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persistent token storage backed by a JSON file with `0600` permissions.
///
/// The file is a cache: the user may delete it at any time to force
/// re-authorization. Saving restricts the permission bits to the owning
/// user so other accounts on the system cannot read the tokens.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a new token store at the given path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the cached token.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not valid
    /// token JSON. Callers treat this as a cache miss and fall back to
    /// interactive authorization.
    pub fn load(&self) -> Result<Token> {
        let content = fs::read_to_string(&self.path)?;
        let token: Token = serde_json::from_str(&content)?;

        debug!(
            "loaded token from {} (expiry={:?})",
            self.path.display(),
            token.expiry
        );

        Ok(token)
    }

    /// Saves a token, overwriting any existing cache.
    ///
    /// Creates parent directories as needed, then restricts the file to
    /// owner read/write. On non-Unix platforms permissions are left at the
    /// platform default.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or its permissions
    /// cannot be set.
    pub fn save(&self, token: &Token) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(token)?;
        fs::write(&self.path, content)?;
        restrict_to_owner(&self.path)?;

        debug!("saved token to {}", self.path.display());
        Ok(())
    }

    /// Returns the cache file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Sets a file's permissions to `0600` on Unix systems.
#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perms = fs::Permissions::from_mode(0o600);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{Duration, Utc};

    fn sample_token() -> Token {
        Token::new("ya29.test-access-token", "Bearer")
            .with_refresh_token("1//0test-refresh-token")
            .with_expiry(Utc::now() + Duration::hours(1))
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));
        assert!(matches!(store.load().unwrap_err(), Error::Io(_)));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));

        let token = sample_token();
        store.save(&token).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token, token.access_token);
        assert_eq!(loaded.refresh_token, token.refresh_token);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let meta = fs::metadata(store.path()).unwrap();
            assert_eq!(meta.permissions().mode() & 0o777, 0o600);
        }
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));
        store.save(&sample_token()).unwrap();

        let first = store.load().unwrap();
        let second = store.load().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));

        store.save(&sample_token()).unwrap();
        let replacement = Token::new("new-access", "Bearer");
        store.save(&replacement).unwrap();

        assert_eq!(store.load().unwrap().access_token, "new-access");
    }

    #[test]
    fn test_malformed_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, "{ not json").unwrap();

        let store = TokenStore::new(path);
        assert!(matches!(store.load().unwrap_err(), Error::Json(_)));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested").join("token.json"));
        store.save(&sample_token()).unwrap();
        assert!(store.load().is_ok());
    }
}
