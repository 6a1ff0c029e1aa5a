//! Percent-encoding of URL components.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::UrlError;

/// Everything except the RFC 3986 unreserved characters `[A-Za-z0-9-._~]`.
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string for use inside any URL component.
///
/// Unreserved ASCII is emitted as-is. Every other character has each byte of
/// its UTF-8 encoding written as `%XX` with uppercase hex digits.
///
/// # Examples
///
/// ```
/// use weburl::percent_encode;
///
/// assert_eq!(percent_encode("a b&c"), "a%20b%26c");
/// assert_eq!(percent_encode("☃"), "%E2%98%83");
/// ```
pub fn percent_encode(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Decode a percent-encoded string.
///
/// Fails with [`UrlError::MalformedPercentEncoding`] when a `%` is not
/// followed by two hex digits, or when the reassembled bytes are not UTF-8.
///
/// # Examples
///
/// ```
/// use weburl::{percent_decode, UrlError};
///
/// assert_eq!(percent_decode("a%20b").unwrap(), "a b");
/// assert_eq!(percent_decode("%e2%98%83").unwrap(), "☃");
/// assert_eq!(percent_decode("%e"), Err(UrlError::MalformedPercentEncoding));
/// ```
pub fn percent_decode(encoded: &str) -> Result<String, UrlError> {
    if !encoded.contains('%') {
        return Ok(encoded.to_string());
    }

    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        if i + 2 >= bytes.len() {
            return Err(UrlError::MalformedPercentEncoding);
        }
        let hi = hex_value(bytes[i + 1]).ok_or(UrlError::MalformedPercentEncoding)?;
        let lo = hex_value(bytes[i + 2]).ok_or(UrlError::MalformedPercentEncoding)?;
        out.push((hi << 4) | lo);
        i += 3;
    }

    // Validity is only known once every escape has been reassembled.
    String::from_utf8(out).map_err(|_| UrlError::MalformedPercentEncoding)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
