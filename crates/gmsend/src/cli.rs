//! Command-line interface.

use clap::Parser;
use std::path::PathBuf;

/// Send a single plain-text email through the Gmail API.
///
/// The message body is read from FILE, or from standard input when FILE is
/// omitted. On first use the program prints an authorization URL and waits
/// for the authorization code on standard input.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Sender display name (defaults to the sender address)
    #[arg(long, default_value = "")]
    pub from_name: String,

    /// Sender email address
    #[arg(long)]
    pub from_email: String,

    /// Recipient display name (defaults to the recipient address)
    #[arg(long, default_value = "")]
    pub to_name: String,

    /// Recipient email address
    #[arg(long)]
    pub to_email: String,

    /// Subject line
    #[arg(long, default_value = "")]
    pub subject: String,

    /// Path to a file holding the message body (stdin when omitted)
    pub body: Option<PathBuf>,
}
