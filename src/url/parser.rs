//! Parsing of raw, possibly user-typed URL strings.
//!
//! The parser is deliberately forgiving about what it accepts (a missing
//! scheme defaults to `http`, a bare host is a complete URL) but strict about
//! escapes, ports and IPv6 brackets.

use std::str::FromStr;

use tracing::trace;

use crate::core::percent::percent_decode;
use crate::error::UrlError;
use crate::types::Url;
use crate::url::host::{classify_host, decode_host, TldTable};

/// Parse a URL using the default [`TldTable`].
///
/// # Examples
///
/// ```
/// use weburl::parse_url;
///
/// let url = parse_url("https://user:pw@a.b.example.org:8443/p%20q?x=1&y#top")?;
/// assert_eq!(url.scheme, "https");
/// assert_eq!(url.user.as_deref(), Some("user"));
/// assert_eq!(url.subdomain, "a.b");
/// assert_eq!(url.host, "example");
/// assert_eq!(url.tld, "org");
/// assert_eq!(url.port(), 8443);
/// assert_eq!(url.path, "/p q");
/// assert_eq!(url.query_params.get("y"), Some(""));
/// assert_eq!(url.fragment, "top");
/// # Ok::<(), weburl::UrlError>(())
/// ```
pub fn parse_url(input: &str) -> Result<Url, UrlError> {
    parse_url_with(input, TldTable::global())
}

/// Parse a URL, panicking if it is malformed.
///
/// Meant for call sites where a bad URL is a programming error, such as
/// string literals.
pub fn parse_url_or_panic(input: &str) -> Url {
    match parse_url(input) {
        Ok(url) => url,
        Err(err) => panic!("invalid URL {:?}: {}", input, err),
    }
}

/// Parse a URL, classifying its host against `table`.
pub fn parse_url_with(input: &str, table: &TldTable) -> Result<Url, UrlError> {
    trace!(input, "parsing url");
    let input = input.trim();
    let mut url = Url::default();

    // Step 1: scheme
    let rest = match input.find("//") {
        Some(pos) if !input[..pos].contains(|c: char| matches!(c, '/' | '?' | '#')) => {
            url.scheme = input[..pos].trim_end_matches(':').to_ascii_lowercase();
            &input[pos + 2..]
        }
        _ => input,
    };
    if url.scheme.is_empty() {
        url.scheme = "http".to_string();
    }

    // Step 2: authority
    let authority_end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let (authority, remainder) = rest.split_at(authority_end);

    let host_and_port = match authority.rfind('@') {
        Some(at) => {
            let userinfo = &authority[..at];
            match userinfo.split_once(':') {
                Some((user, pass)) => {
                    url.user = Some(percent_decode(user)?);
                    url.pass = Some(percent_decode(pass)?);
                }
                None => url.user = Some(percent_decode(userinfo)?),
            }
            &authority[at + 1..]
        }
        None => authority,
    };

    let (raw_host, raw_port) = split_host_port(host_and_port, remainder.chars().next())?;

    // Step 3: port
    url.provided_port = match raw_port {
        Some(port) => parse_port(port)?,
        None => None,
    };

    // Step 4: path, query, fragment
    parse_path_query_fragment(&mut url, remainder)?;

    // Step 5: host classification
    let decoded = decode_host(raw_host)?;
    let parts = classify_host(&decoded, table);
    url.subdomain = parts.subdomain;
    url.host = parts.host;
    url.tld = parts.tld;

    Ok(url)
}

/// Separate the host from an optional `:port` suffix.
///
/// `terminator` is the character that ended the authority, if any. An IPv6
/// literal may only be followed by `:`, `/`, `?` or the end of input.
fn split_host_port(
    host_and_port: &str,
    terminator: Option<char>,
) -> Result<(&str, Option<&str>), UrlError> {
    if host_and_port.starts_with('[') {
        let close = host_and_port
            .find(']')
            .ok_or(UrlError::UnterminatedIPv6Literal)?;
        let literal = &host_and_port[..=close];
        let after = &host_and_port[close + 1..];
        if after.is_empty() {
            return match terminator {
                None | Some('/') | Some('?') => Ok((literal, None)),
                Some(c) => Err(UrlError::MalformedUrl(format!(
                    "unexpected {:?} after IPv6 literal",
                    c
                ))),
            };
        }
        return match after.strip_prefix(':') {
            Some(port) => Ok((literal, Some(port))),
            None => Err(UrlError::MalformedUrl(format!(
                "unexpected {:?} after IPv6 literal",
                after
            ))),
        };
    }

    Ok(match host_and_port.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_and_port, None),
    })
}

/// An empty port counts as absent.
fn parse_port(raw: &str) -> Result<Option<u16>, UrlError> {
    if raw.is_empty() {
        return Ok(None);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UrlError::InvalidPort(raw.to_string()));
    }
    raw.parse::<u16>()
        .map(Some)
        .map_err(|_| UrlError::InvalidPort(raw.to_string()))
}

/// Fill `path`, `query_params` and `fragment` from the text after the authority.
pub(crate) fn parse_path_query_fragment(url: &mut Url, rest: &str) -> Result<(), UrlError> {
    let (path, tail) = match rest.find(|c: char| c == '?' || c == '#') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    url.path = percent_decode(path)?;

    let fragment = if let Some(query_and_fragment) = tail.strip_prefix('?') {
        let (query, fragment) = match query_and_fragment.split_once('#') {
            Some((query, fragment)) => (query, Some(fragment)),
            None => (query_and_fragment, None),
        };
        for piece in query.split('&').filter(|piece| !piece.is_empty()) {
            let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
            url.query_params
                .add(percent_decode(key)?, percent_decode(value)?);
        }
        fragment
    } else {
        tail.strip_prefix('#')
    };

    if let Some(fragment) = fragment {
        url.fragment = percent_decode(fragment)?;
    }
    Ok(())
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_url(s)
    }
}

impl TryFrom<&str> for Url {
    type Error = UrlError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parse_url(s)
    }
}

/// Equality against a raw string parses it first; unparsable strings are never equal.
impl PartialEq<str> for Url {
    fn eq(&self, other: &str) -> bool {
        parse_url(other).map_or(false, |parsed| *self == parsed)
    }
}

impl PartialEq<&str> for Url {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}
