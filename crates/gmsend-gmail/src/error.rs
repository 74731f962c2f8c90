//! Error types for Gmail API operations.

/// Result type alias for Gmail API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Gmail API error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// `OAuth2` error (token refresh).
    #[error("OAuth2 error: {0}")]
    OAuth(#[from] gmsend_oauth::Error),

    /// API error response.
    #[error("Gmail API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body with provider error detail.
        body: String,
    },
}
