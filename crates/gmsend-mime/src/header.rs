//! MIME header handling.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// Collection of email headers.
///
/// Lookup is case-insensitive and each name holds exactly one value;
/// [`Headers::set`] replaces. Serialization is deterministic (sorted by
/// name) with CRLF line endings.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    // lowercased name -> (name as first written, value)
    headers: BTreeMap<String, (String, String)>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header value, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers
            .insert(name.to_lowercase(), (name, value.into()));
    }

    /// Gets the value for a header (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .map(|(_, value)| value.as_str())
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns an iterator over all headers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Writes every header as a CRLF-terminated `Name: value` line.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (name, value) in self.iter() {
            write!(writer, "{name}: {value}\r\n")?;
        }
        Ok(())
    }
}
