//! Raw message construction and encoding.

use crate::address::Address;
use crate::error::Result;
use crate::header::Headers;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::write::EncoderStringWriter;
use std::io::{self, Read, Write};

/// A single plain-text message ready for raw encoding.
///
/// The header block is fixed: `From`, `To`, `Subject`, `MIME-Version`,
/// `Content-Type` (`text/plain; charset=utf-8`) and
/// `Content-Transfer-Encoding` (`base64`).
#[derive(Debug, Clone)]
pub struct Message {
    /// Sender.
    pub from: Address,
    /// Recipient.
    pub to: Address,
    /// Subject line. May be empty.
    pub subject: String,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(from: Address, to: Address, subject: impl Into<String>) -> Self {
        Self {
            from,
            to,
            subject: subject.into(),
        }
    }

    /// Builds the fixed six-header block.
    #[must_use]
    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.set("From", self.from.to_string());
        headers.set("To", self.to.to_string());
        headers.set("MIME-Version", "1.0");
        headers.set("Content-Type", "text/plain; charset=utf-8");
        headers.set("Content-Transfer-Encoding", "base64");
        headers.set("Subject", self.subject.clone());
        headers
    }

    /// Encodes the full message as an unpadded base64url string.
    ///
    /// Streams the header lines (each CRLF-terminated), a blank CRLF line,
    /// then the body byte-for-byte into the encoder, and finishes the
    /// stream so no padding characters appear.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the body or writing the stream fails.
    pub fn encode<R: Read + ?Sized>(&self, body: &mut R) -> Result<String> {
        let mut encoder = EncoderStringWriter::new(&URL_SAFE_NO_PAD);

        self.headers().write_to(&mut encoder)?;
        encoder.write_all(b"\r\n")?;
        io::copy(body, &mut encoder)?;

        Ok(encoder.into_inner())
    }
}
