//! # gmsend-gmail
//!
//! Authenticated Gmail REST client for the gmsend CLI.
//!
//! Wraps a token (cached or freshly authorized) into a client that attaches
//! bearer credentials to every call and transparently refreshes the access
//! token in memory when it has gone stale. The only operation is
//! [`GmailClient::send_raw`], which submits an unpadded base64url raw
//! message to `users/me/messages/send`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gmsend_gmail::{GmailClient, SEND_SCOPE};
//!
//! let mut client = GmailClient::new(config, token);
//! let id = client.send_raw(&raw_message).await?;
//! println!("sent message {id}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;

pub use client::{GmailClient, SEND_SCOPE};
pub use error::{Error, Result};
