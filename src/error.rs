//! Error types for URL parsing, encoding and serialization.

use thiserror::Error;

/// Errors that can occur while parsing, encoding or serializing a URL.
///
/// Every failure is local to the input that produced it; no partially parsed
/// [`Url`](crate::Url) is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// A `%` escape is truncated, contains non-hex digits, or the decoded
    /// bytes are not valid UTF-8.
    #[error("Malformed percent encoding")]
    MalformedPercentEncoding,

    /// The port is not a valid unsigned 16-bit integer.
    #[error("Invalid port: {0:?}")]
    InvalidPort(String),

    /// An IPv6 literal was opened with `[` but never closed.
    #[error("Unterminated IPv6 literal")]
    UnterminatedIPv6Literal,

    /// The authority is structurally invalid.
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// A host label contains an ASCII character that is not allowed there.
    #[error("Illegal character in host: {0:?}")]
    IllegalHostCharacter(char),

    /// The punycode delta grew past what a `u32` can hold.
    #[error("Punycode overflow")]
    PunycodeOverflow,

    /// An `xn--` label could not be decoded.
    #[error("Invalid punycode label: {0}")]
    InvalidPunycode(String),
}
