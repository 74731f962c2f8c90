//! # gmsend-oauth
//!
//! `OAuth2` authorization-code flow and token cache for the gmsend CLI.
//!
//! ## Features
//!
//! - **Client secret loading**: Parses Google client-secret JSON files
//!   (`installed` or `web` application types) into an immutable
//!   [`ClientConfig`]
//! - **Authorization Code Flow**: Authorization URL generation (with offline
//!   access so a refresh token is issued), code exchange, token refresh
//! - **Token cache**: JSON file storage with owner-only permissions
//! - **Injectable prompts**: The authorization code is obtained through the
//!   [`CodeProvider`] trait, so tests can supply one programmatically
//!
//! ## Quick Start
//!
//! ```ignore
//! use gmsend_oauth::{AuthorizationCodeFlow, ClientConfig, ConsolePrompt, TokenStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_file(
//!         "client_secret.json".as_ref(),
//!         &["https://www.googleapis.com/auth/gmail.send"],
//!     )?;
//!
//!     let store = TokenStore::new("token.json".into());
//!     let token = match store.load() {
//!         Ok(token) => token,
//!         Err(_) => {
//!             let flow = AuthorizationCodeFlow::new(config.clone());
//!             let token = flow.authorize(&ConsolePrompt).await?;
//!             store.save(&token)?;
//!             token
//!         }
//!     };
//!
//!     println!("Access token: {}", token.access_token);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod flow;
pub mod secret;
pub mod store;
pub mod token;

pub use error::{Error, Result};
pub use flow::{AuthorizationCodeFlow, CodeProvider, ConsolePrompt};
pub use secret::ClientConfig;
pub use store::TokenStore;
pub use token::Token;
