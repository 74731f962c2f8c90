//! Client secret file parsing.
//!
//! Google Cloud Console hands out client credentials as a JSON file with a
//! single top-level key naming the application type:
//!
//! ```json
//! {"installed": {"client_id": "...", "client_secret": "...",
//!                "auth_uri": "...", "token_uri": "...",
//!                "redirect_uris": ["urn:ietf:wg:oauth:2.0:oob"]}}
//! ```
//!
//! `web` applications use the same shape under a `"web"` key.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

/// Fallback redirect for installed applications without a registered one.
const OOB_REDIRECT: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Raw client secret file contents.
#[derive(Debug, Deserialize)]
struct SecretFile {
    installed: Option<AppSecret>,
    web: Option<AppSecret>,
}

/// One application entry inside a client secret file.
#[derive(Debug, Clone, Deserialize)]
struct AppSecret {
    client_id: String,
    client_secret: String,
    auth_uri: String,
    token_uri: String,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

/// Immutable `OAuth2` client configuration.
///
/// Loaded once from the client secret file; lives for the whole process.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Client ID from the provider.
    pub client_id: String,
    /// Client secret.
    pub client_secret: String,
    /// Authorization endpoint URL.
    pub auth_url: Url,
    /// Token endpoint URL.
    pub token_url: Url,
    /// Redirect URI sent with the authorization request.
    pub redirect_uri: String,
    /// Requested scopes.
    pub scopes: Vec<String>,
}

impl ClientConfig {
    /// Loads a client configuration from a Google client secret file.
    ///
    /// Accepts both `installed` and `web` application entries, preferring
    /// `installed`. The requested scopes are fixed at load time.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, holds
    /// neither application type, or carries malformed endpoint URLs.
    pub fn from_file(path: &Path, scopes: &[&str]) -> Result<Self> {
        let bytes = fs::read(path)?;
        let file: SecretFile = serde_json::from_slice(&bytes)?;

        let app = file.installed.or(file.web).ok_or_else(|| {
            Error::InvalidSecret(format!(
                "{}: no 'installed' or 'web' application entry",
                path.display()
            ))
        })?;

        tracing::debug!("loaded client secret from {}", path.display());

        Self::from_app(app, scopes)
    }

    fn from_app(app: AppSecret, scopes: &[&str]) -> Result<Self> {
        if app.client_id.is_empty() {
            return Err(Error::InvalidSecret("client_id is empty".into()));
        }

        let redirect_uri = app
            .redirect_uris
            .first()
            .cloned()
            .unwrap_or_else(|| OOB_REDIRECT.to_string());

        Ok(Self {
            client_id: app.client_id,
            client_secret: app.client_secret,
            auth_url: Url::parse(&app.auth_uri)?,
            token_url: Url::parse(&app.token_uri)?,
            redirect_uri,
            scopes: scopes.iter().map(ToString::to_string).collect(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const INSTALLED: &str = r#"{
        "installed": {
            "client_id": "abc123.apps.googleusercontent.com",
            "client_secret": "s3cret",
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
            "token_uri": "https://oauth2.googleapis.com/token",
            "redirect_uris": ["urn:ietf:wg:oauth:2.0:oob", "http://localhost"]
        }
    }"#;

    fn write_secret(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_installed_secret() {
        let file = write_secret(INSTALLED);
        let config = ClientConfig::from_file(
            file.path(),
            &["https://www.googleapis.com/auth/gmail.send"],
        )
        .unwrap();

        assert_eq!(config.client_id, "abc123.apps.googleusercontent.com");
        assert_eq!(config.client_secret, "s3cret");
        assert_eq!(config.redirect_uri, "urn:ietf:wg:oauth:2.0:oob");
        assert_eq!(
            config.token_url.as_str(),
            "https://oauth2.googleapis.com/token"
        );
        assert_eq!(
            config.scopes,
            vec!["https://www.googleapis.com/auth/gmail.send".to_string()]
        );
    }

    #[test]
    fn test_web_secret() {
        let json = INSTALLED.replace("installed", "web");
        let file = write_secret(&json);
        let config = ClientConfig::from_file(file.path(), &[]).unwrap();
        assert_eq!(config.client_id, "abc123.apps.googleusercontent.com");
    }

    #[test]
    fn test_missing_application_entry() {
        let file = write_secret(r#"{"something_else": {}}"#);
        let err = ClientConfig::from_file(file.path(), &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidSecret(_)));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_secret("not json at all");
        let err = ClientConfig::from_file(file.path(), &[]).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ClientConfig::from_file(Path::new("/nonexistent/secret.json"), &[]).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_defaults_to_oob_redirect() {
        let json = r#"{
            "installed": {
                "client_id": "abc",
                "client_secret": "s",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token"
            }
        }"#;
        let file = write_secret(json);
        let config = ClientConfig::from_file(file.path(), &[]).unwrap();
        assert_eq!(config.redirect_uri, OOB_REDIRECT);
    }
}
