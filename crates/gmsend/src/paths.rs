//! Fixed file locations, made explicit so tests can inject their own.

use anyhow::Context as _;
use std::path::PathBuf;

/// Name of the client secret file under the home directory.
const CREDENTIALS_FILE: &str = ".gmsend-credentials.json";

/// Name of the token cache file under the home directory.
const TOKEN_FILE: &str = ".gmsend-token.json";

/// Locations of the credential file and the token cache.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Client secret file (must pre-exist).
    pub credentials: PathBuf,
    /// Token cache file (created on first authorization).
    pub token: PathBuf,
}

impl Paths {
    /// Builds the default paths under the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn from_home() -> anyhow::Result<Self> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        Ok(Self {
            credentials: home.join(CREDENTIALS_FILE),
            token: home.join(TOKEN_FILE),
        })
    }
}
