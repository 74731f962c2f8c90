//! Mail address formatting.

use std::fmt;

/// A mail address with an optional display name.
///
/// `Display` renders the RFC 5322 form `Display Name <email>`: the name is
/// left bare when it is a plain atom phrase, wrapped in a quoted-string when
/// it contains specials, and RFC 2047 q-encoded when it is not printable
/// ASCII.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Display name. May be empty, in which case only `<email>` is rendered.
    pub name: String,
    /// The address itself (`local@domain`).
    pub email: String,
}

impl Address {
    /// Creates a new address.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// RFC 5322 atext: the characters allowed in an unquoted atom.
fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
        )
}

/// Printable ASCII including space and tab.
fn is_printable_ascii(c: char) -> bool {
    matches!(c, '\x21'..='\x7e') || c == ' ' || c == '\t'
}

const UPPERHEX: &[u8; 16] = b"0123456789ABCDEF";

/// RFC 2047 Q-encoding of a UTF-8 display name.
///
/// Space becomes `_`; printable ASCII other than `=`, `?` and `_` passes
/// through; every other byte becomes `=HH`.
fn q_encode(name: &str) -> String {
    let mut out = String::with_capacity(name.len() * 3);
    for &b in name.as_bytes() {
        match b {
            b' ' => out.push('_'),
            b'!'..=b'~' if b != b'=' && b != b'?' && b != b'_' => out.push(char::from(b)),
            _ => {
                out.push('=');
                out.push(char::from(UPPERHEX[usize::from(b >> 4)]));
                out.push(char::from(UPPERHEX[usize::from(b & 0x0f)]));
            }
        }
    }
    out
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            return write!(f, "<{}>", self.email);
        }

        if self.name.chars().all(is_printable_ascii) {
            if self.name.chars().all(is_atext) {
                write!(f, "{} <{}>", self.name, self.email)
            } else {
                // Quoted-string: escape backslash and double quote
                write!(f, "\"")?;
                for c in self.name.chars() {
                    if c == '\\' || c == '"' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, "\" <{}>", self.email)
            }
        } else {
            // Non-ASCII display name: RFC 2047 q-encoding
            write!(f, "=?utf-8?q?{}?= <{}>", q_encode(&self.name), self.email)
        }
    }
}
