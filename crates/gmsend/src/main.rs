//! gmsend - send a single email through the Gmail API.
//!
//! Authenticates via the `OAuth2` authorization-code flow (caching the token
//! under the home directory), builds a plain-text MIME message from CLI
//! flags and stdin or a file, and submits it to `users/me/messages/send`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod paths;

use anyhow::{Context as _, bail};
use clap::Parser;
use cli::Cli;
use gmsend_gmail::{GmailClient, SEND_SCOPE};
use gmsend_mime::{Address, Message};
use gmsend_oauth::{AuthorizationCodeFlow, ClientConfig, ConsolePrompt, TokenStore};
use paths::Paths;
use std::fs::File;
use std::io::{self, Read};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gmsend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

/// Builds the message from the CLI arguments.
///
/// Empty display names default to the corresponding email address.
fn build_message(cli: &Cli) -> anyhow::Result<Message> {
    if cli.from_email.is_empty() {
        bail!("--from-email is empty");
    }
    if cli.to_email.is_empty() {
        bail!("--to-email is empty");
    }

    let from_name = if cli.from_name.is_empty() {
        &cli.from_email
    } else {
        &cli.from_name
    };
    let to_name = if cli.to_name.is_empty() {
        &cli.to_email
    } else {
        &cli.to_name
    };

    Ok(Message::new(
        Address::new(from_name, &cli.from_email),
        Address::new(to_name, &cli.to_email),
        &cli.subject,
    ))
}

/// Encodes the message with the body from the given file or stdin.
fn encode_message(cli: &Cli, message: &Message) -> anyhow::Result<String> {
    let mut body: Box<dyn Read> = match &cli.body {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    message
        .encode(&mut body)
        .context("failed to encode message")
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let message = build_message(&cli)?;
    let raw = encode_message(&cli, &message)?;

    let paths = Paths::from_home()?;
    let config = ClientConfig::from_file(&paths.credentials, &[SEND_SCOPE]).with_context(|| {
        format!(
            "unable to read client secret file {}",
            paths.credentials.display()
        )
    })?;

    let store = TokenStore::new(paths.token);
    let token = match store.load() {
        Ok(token) => token,
        Err(err) => {
            warn!("no usable cached token ({err}), starting authorization");
            let flow = AuthorizationCodeFlow::new(config.clone());
            let token = flow
                .authorize(&ConsolePrompt)
                .await
                .context("authorization failed")?;
            store
                .save(&token)
                .with_context(|| format!("unable to cache token at {}", store.path().display()))?;
            info!("saved token to {}", store.path().display());
            token
        }
    };

    let mut client = GmailClient::new(config, token);
    let id = client
        .send_raw(&raw)
        .await
        .context("failed to send message")?;

    info!("message sent, id={id}");
    Ok(())
}
