//! # gmsend-mime
//!
//! Raw MIME message construction for the Gmail send API.
//!
//! ## Features
//!
//! - **Address formatting**: `Display Name <email>` with RFC 5322 quoting
//!   and RFC 2047 encoding of non-ASCII display names
//! - **Header block**: the fixed six-header set for a plain-text message
//! - **Raw encoding**: streaming unpadded base64url over
//!   `headers + CRLF + body`, the format Gmail's `messages.send` expects
//!
//! ## Quick Start
//!
//! ```ignore
//! use gmsend_mime::{Address, Message};
//!
//! let message = Message::new(
//!     Address::new("Alice", "alice@example.com"),
//!     Address::new("Bob", "bob@example.com"),
//!     "Hello",
//! );
//!
//! let raw = message.encode(&mut "hello world".as_bytes())?;
//! // POST {"raw": raw} to users/me/messages/send
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod error;
mod header;
mod message;

pub use address::Address;
pub use error::{Error, Result};
pub use header::Headers;
pub use message::Message;
