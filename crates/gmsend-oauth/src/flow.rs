//! `OAuth2` authorization-code flow.

use crate::error::{Error, Result};
use crate::secret::ClientConfig;
use crate::token::{ErrorResponse, Token, TokenResponse};
use reqwest::Client;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use tracing::debug;
use url::Url;

/// Source of the authorization code during interactive authorization.
///
/// Abstracting the console read lets tests supply a code programmatically.
pub trait CodeProvider {
    /// Obtains an authorization code for the given authorization URL.
    ///
    /// # Errors
    ///
    /// Returns an error if no code can be obtained.
    fn authorization_code(&self, auth_url: &Url) -> Result<String>;
}

/// Console-based [`CodeProvider`].
///
/// Prints the authorization URL to stdout and blocks reading a single
/// whitespace-delimited code from stdin. No timeout: an unanswered prompt
/// blocks indefinitely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompt;

impl CodeProvider for ConsolePrompt {
    fn authorization_code(&self, auth_url: &Url) -> Result<String> {
        let mut stdout = std::io::stdout().lock();
        writeln!(
            stdout,
            "Go to the following link in your browser then type the authorization code:\n{auth_url}"
        )?;
        stdout.flush()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;

        line.split_whitespace()
            .next()
            .map(ToString::to_string)
            .ok_or_else(|| Error::CodeInput("no code entered".into()))
    }
}

/// Authorization Code Flow for `OAuth2`.
///
/// Suitable for applications where the user can open a browser and paste
/// back the authorization code.
#[derive(Debug, Clone)]
pub struct AuthorizationCodeFlow {
    config: ClientConfig,
    http_client: Client,
}

impl AuthorizationCodeFlow {
    /// Creates a new authorization code flow.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    /// Builds the authorization URL for user consent.
    ///
    /// Requests offline access so the token endpoint issues a refresh token.
    ///
    /// # Arguments
    ///
    /// * `state` - Optional state parameter for CSRF protection
    #[must_use]
    pub fn authorization_url(&self, state: Option<&str>) -> Url {
        let mut url = self.config.auth_url.clone();

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("client_id", &self.config.client_id)
                .append_pair("response_type", "code")
                .append_pair("redirect_uri", &self.config.redirect_uri)
                .append_pair("access_type", "offline");

            let scope_str = self.config.scopes.join(" ");
            if !scope_str.is_empty() {
                pairs.append_pair("scope", &scope_str);
            }

            if let Some(state_val) = state {
                pairs.append_pair("state", state_val);
            }
        }

        url
    }

    /// Runs the interactive flow: URL, code from the provider, exchange.
    ///
    /// # Errors
    ///
    /// Returns an error if the code cannot be obtained or the exchange
    /// fails. There is no retry; the caller must rerun and re-authorize.
    pub async fn authorize<P: CodeProvider>(&self, provider: &P) -> Result<Token> {
        let auth_url = self.authorization_url(Some("state-token"));
        let code = provider.authorization_code(&auth_url)?;
        self.exchange_code(&code).await
    }

    /// Exchanges an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails; the `OAuth2` error body
    /// (`{error, error_description}`) is mapped to [`Error::OAuth`].
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        debug!("exchanging authorization code for tokens");

        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("code", code);
        params.insert("client_id", &self.config.client_id);
        params.insert("client_secret", &self.config.client_secret);
        params.insert("redirect_uri", &self.config.redirect_uri);

        let response = self
            .http_client
            .post(self.config.token_url.clone())
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let error: ErrorResponse = response.json().await?;
            return Err(error.into_error());
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(Token::from_response(token_response))
    }

    /// Refreshes an access token using its refresh token.
    ///
    /// The refresh token is preserved when the server does not rotate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the token has no refresh token or the refresh
    /// request fails.
    pub async fn refresh(&self, token: &Token) -> Result<Token> {
        let refresh_token = token.refresh_token()?;

        debug!("refreshing access token");

        let mut params = HashMap::new();
        params.insert("grant_type", "refresh_token");
        params.insert("refresh_token", refresh_token);
        params.insert("client_id", &self.config.client_id);
        params.insert("client_secret", &self.config.client_secret);

        let response = self
            .http_client
            .post(self.config.token_url.clone())
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let error: ErrorResponse = response.json().await?;
            return Err(error.into_error());
        }

        let token_response: TokenResponse = response.json().await?;
        let mut new_token = Token::from_response(token_response);

        // Preserve refresh token if not returned
        if new_token.refresh_token.is_none() {
            new_token.refresh_token.clone_from(&token.refresh_token);
        }

        Ok(new_token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};
    use tokio::net::TcpListener;

    /// Serves a single canned JSON response on a local port.
    ///
    /// Reads the full request (headers plus `Content-Length` body) before
    /// answering so the client's write is never reset.
    async fn serve_once(status: u16, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&request[..pos]).to_ascii_lowercase();
                    let content_length = headers
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|value| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= pos + 4 + content_length {
                        break;
                    }
                }
            }
            let reason = if status == 200 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn test_config() -> ClientConfig {
        ClientConfig {
            client_id: "test_client".to_string(),
            client_secret: "test_secret".to_string(),
            auth_url: Url::parse("https://accounts.google.com/o/oauth2/auth").unwrap(),
            token_url: Url::parse("https://oauth2.googleapis.com/token").unwrap(),
            redirect_uri: "urn:ietf:wg:oauth:2.0:oob".to_string(),
            scopes: vec!["https://www.googleapis.com/auth/gmail.send".to_string()],
        }
    }

    #[test]
    fn test_authorization_url() {
        let flow = AuthorizationCodeFlow::new(test_config());
        let url = flow.authorization_url(Some("state-token"));

        assert!(url.as_str().contains("client_id=test_client"));
        assert!(url.as_str().contains("response_type=code"));
        assert!(url.as_str().contains("access_type=offline"));
        assert!(url.as_str().contains("state=state-token"));
        // Check URL-encoded scope and redirect
        assert!(
            url.as_str()
                .contains("scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fgmail.send")
        );
        assert!(
            url.as_str()
                .contains("redirect_uri=urn%3Aietf%3Awg%3Aoauth%3A2.0%3Aoob")
        );
    }

    #[test]
    fn test_authorization_url_without_state() {
        let flow = AuthorizationCodeFlow::new(test_config());
        let url = flow.authorization_url(None);
        assert!(!url.as_str().contains("state="));
    }

    #[test]
    fn test_authorization_url_empty_scopes_omitted() {
        let mut config = test_config();
        config.scopes.clear();
        let flow = AuthorizationCodeFlow::new(config);
        let url = flow.authorization_url(None);
        assert!(!url.as_str().contains("scope="));
    }

    struct FixedCode(&'static str);

    impl CodeProvider for FixedCode {
        fn authorization_code(&self, _auth_url: &Url) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct NoCode;

    impl CodeProvider for NoCode {
        fn authorization_code(&self, _auth_url: &Url) -> Result<String> {
            Err(Error::CodeInput("no code entered".into()))
        }
    }

    #[tokio::test]
    async fn test_authorize_fails_without_code() {
        let flow = AuthorizationCodeFlow::new(test_config());
        let err = flow.authorize(&NoCode).await.unwrap_err();
        assert!(matches!(err, Error::CodeInput(_)));
    }

    #[test]
    fn test_code_provider_is_injectable() {
        let provider = FixedCode("4/0Atest");
        let url = Url::parse("https://accounts.google.com/o/oauth2/auth").unwrap();
        assert_eq!(provider.authorization_code(&url).unwrap(), "4/0Atest");
    }

    fn stub_config(token_url: &str) -> ClientConfig {
        let mut config = test_config();
        config.token_url = Url::parse(token_url).unwrap();
        config
    }

    #[tokio::test]
    async fn test_refresh_preserves_refresh_token_when_not_rotated() {
        let base = serve_once(
            200,
            r#"{"access_token":"access2","token_type":"Bearer","expires_in":3600}"#,
        )
        .await;
        let flow = AuthorizationCodeFlow::new(stub_config(&base));
        let old = Token::new("access1", "Bearer").with_refresh_token("refresh1");

        let refreshed = flow.refresh(&old).await.unwrap();
        assert_eq!(refreshed.access_token, "access2");
        assert_eq!(refreshed.refresh_token.as_deref(), Some("refresh1"));
        assert!(refreshed.expiry.is_some());
    }

    #[tokio::test]
    async fn test_refresh_adopts_rotated_refresh_token() {
        let base = serve_once(
            200,
            r#"{"access_token":"access2","token_type":"Bearer","expires_in":3600,"refresh_token":"refresh2"}"#,
        )
        .await;
        let flow = AuthorizationCodeFlow::new(stub_config(&base));
        let old = Token::new("access1", "Bearer").with_refresh_token("refresh1");

        let refreshed = flow.refresh(&old).await.unwrap();
        assert_eq!(refreshed.refresh_token.as_deref(), Some("refresh2"));
    }

    #[tokio::test]
    async fn test_refresh_maps_oauth_error_body() {
        let base = serve_once(
            400,
            r#"{"error":"invalid_grant","error_description":"Token has been revoked."}"#,
        )
        .await;
        let flow = AuthorizationCodeFlow::new(stub_config(&base));
        let old = Token::new("access1", "Bearer").with_refresh_token("refresh1");

        let err = flow.refresh(&old).await.unwrap_err();
        assert!(matches!(err, Error::OAuth { .. }));
        assert!(err.to_string().contains("invalid_grant"));
    }

    #[tokio::test]
    async fn test_exchange_code_parses_token_response() {
        let base = serve_once(
            200,
            r#"{"access_token":"access1","token_type":"Bearer","expires_in":3600,"refresh_token":"refresh1"}"#,
        )
        .await;
        let flow = AuthorizationCodeFlow::new(stub_config(&base));

        let token = flow.authorize(&FixedCode("4/0Acode")).await.unwrap();
        assert_eq!(token.access_token, "access1");
        assert_eq!(token.refresh_token.as_deref(), Some("refresh1"));
        assert!(!token.is_expired());
    }
}
