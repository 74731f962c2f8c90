//! Gmail API client with bearer auth and transparent token refresh.

use crate::error::{Error, Result};
use gmsend_oauth::{AuthorizationCodeFlow, ClientConfig, Token};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scope for sending mail only.
pub const SEND_SCOPE: &str = "https://www.googleapis.com/auth/gmail.send";

/// Gmail API base URL for the authenticated user ("me").
const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

/// Payload for the `messages.send` call.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    raw: &'a str,
}

/// Response from the `messages.send` call.
#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Gmail API client for the account owning the `OAuth2` token.
///
/// Holds the token in memory and refreshes it through the token endpoint
/// when expired. The refreshed token is not written back to the on-disk
/// cache; the cache catches up on a later invocation once its own access
/// token has expired.
#[derive(Debug)]
pub struct GmailClient {
    oauth: AuthorizationCodeFlow,
    token: Token,
    http_client: reqwest::Client,
    base_url: String,
}

impl GmailClient {
    /// Creates a new client from a client configuration and a token.
    #[must_use]
    pub fn new(config: ClientConfig, token: Token) -> Self {
        Self::with_base_url(config, token, GMAIL_API_BASE)
    }

    /// Creates a client against a custom base URL (for testing).
    #[must_use]
    pub fn with_base_url(config: ClientConfig, token: Token, base_url: &str) -> Self {
        Self {
            oauth: AuthorizationCodeFlow::new(config),
            token,
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns a valid access token, refreshing in memory if expired.
    async fn access_token(&mut self) -> Result<&str> {
        if self.token.is_expired() {
            debug!("access token expired, refreshing");
            self.token = self.oauth.refresh(&self.token).await?;
        }
        Ok(&self.token.access_token)
    }

    /// Sends a raw message for the authenticated user.
    ///
    /// `raw` is the unpadded base64url encoding of a full RFC 2822 message.
    /// Returns the Gmail message id on success.
    ///
    /// # Errors
    ///
    /// Returns an error on token refresh failure, transport failure, or a
    /// non-success API response (which carries the provider error detail).
    pub async fn send_raw(&mut self, raw: &str) -> Result<String> {
        let url = format!("{}/messages/send", self.base_url);
        let request = SendRequest { raw };

        let token = self.access_token().await?.to_string();
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let send_response: SendResponse = response.json().await?;
        debug!("sent message, id={}", send_response.id);
        Ok(send_response.id)
    }
}
