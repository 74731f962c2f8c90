//! Error types for MIME operations.

use std::io;

/// Result type alias for MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// MIME error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error while reading the body or writing the encoding stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
