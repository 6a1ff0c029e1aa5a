//! Known-suffix table and host classification.
//!
//! A dotted host is split into `subdomain`, `host` and `tld` by looking up its
//! trailing one or two labels in a [`TldTable`].

use std::collections::HashSet;

use once_cell::sync::Lazy;
use tracing::trace;

use crate::core::punycode::{has_ace_prefix, punycode_decode, punycode_encode};
use crate::error::UrlError;

static DEFAULT_LIST: &str = include_str!("tlds.txt");

static GLOBAL: Lazy<TldTable> = Lazy::new(|| TldTable::from_list(DEFAULT_LIST));

/// Set of known top-level suffixes, single-label (`org`) or compound (`co.uk`).
///
/// Suffixes are stored lowercased and decoded to Unicode; lookups are
/// case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TldTable {
    suffixes: HashSet<String>,
}

impl TldTable {
    /// Build a table from any collection of suffix strings.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = suffixes
            .into_iter()
            .filter_map(|s| normalize_suffix(s.as_ref()))
            .collect();
        Self { suffixes }
    }

    /// Build a table from Public Suffix List style text.
    ///
    /// One suffix per line. Blank lines and `//` comments are skipped, and
    /// wildcard (`*.`) or exception (`!`) markers are dropped.
    pub fn from_list(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with("//")),
        )
    }

    /// The process-wide default table, built once from the embedded list.
    pub fn global() -> &'static TldTable {
        &GLOBAL
    }

    /// Whether `suffix` is a known top-level suffix.
    pub fn is_known_tld(&self, suffix: &str) -> bool {
        if self.suffixes.contains(suffix) {
            return true;
        }
        let lowered = suffix.to_lowercase();
        lowered != suffix && self.suffixes.contains(&lowered)
    }

    /// Add a suffix to the table.
    pub fn insert(&mut self, suffix: &str) -> bool {
        match normalize_suffix(suffix) {
            Some(s) => self.suffixes.insert(s),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

fn normalize_suffix(raw: &str) -> Option<String> {
    let trimmed = raw
        .split_whitespace()
        .next()?
        .trim_start_matches('!')
        .trim_start_matches("*.")
        .trim_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    let decoded = trimmed
        .split('.')
        .map(punycode_decode)
        .collect::<Result<Vec<_>, _>>()
        .ok()?
        .join(".");
    Some(decoded.to_lowercase())
}

/// A host split into its three parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostParts {
    /// Labels before the registrable host, joined with dots.
    pub subdomain: String,
    /// The registrable host label, or a bracketed IPv6 literal.
    pub host: String,
    /// The recognized suffix, empty when none matched.
    pub tld: String,
}

/// Split a Unicode host into subdomain, host and tld.
///
/// IPv6 literals (leading `[`) are returned verbatim as the host. Hosts with
/// no recognized suffix keep the whole string as the host.
///
/// # Examples
///
/// ```
/// use weburl::{classify_host, TldTable};
///
/// let parts = classify_host("api.example.co.uk", TldTable::global());
/// assert_eq!(parts.subdomain, "api");
/// assert_eq!(parts.host, "example");
/// assert_eq!(parts.tld, "co.uk");
/// ```
pub fn classify_host(host: &str, table: &TldTable) -> HostParts {
    if host.starts_with('[') {
        return HostParts {
            host: host.to_string(),
            ..HostParts::default()
        };
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() == 1 {
        return HostParts {
            host: host.to_string(),
            ..HostParts::default()
        };
    }

    let suffix_len = suffix_length(&labels, table);
    if suffix_len == 0 {
        trace!(host, "no known suffix");
        return HostParts {
            host: host.to_string(),
            ..HostParts::default()
        };
    }

    let split = labels.len() - suffix_len;
    let tld = labels[split..].join(".");
    let rest = &labels[..split];
    let (subdomain, registrable) = match rest.split_last() {
        Some((last, before)) => (before.join("."), last.to_string()),
        None => (String::new(), String::new()),
    };

    trace!(host, %subdomain, host_label = %registrable, %tld, "classified host");
    HostParts {
        subdomain,
        host: registrable,
        tld,
    }
}

/// Number of trailing labels forming the suffix, leaving at least one label
/// in front of it.
fn suffix_length(labels: &[&str], table: &TldTable) -> usize {
    let n = labels.len();
    if n > 2 && table.is_known_tld(&labels[n - 2..].join(".")) {
        return 2;
    }
    if table.is_known_tld(labels[n - 1]) {
        return 1;
    }
    0
}

/// Decode any `xn--` labels of a raw host and check its ASCII characters.
///
/// Every decoded label must encode back to ASCII, so a host accepted here
/// can always be written in machine form. IPv6 literals are returned
/// unchanged.
pub fn decode_host(raw: &str) -> Result<String, UrlError> {
    if raw.starts_with('[') {
        return Ok(raw.to_string());
    }
    let decoded = raw
        .split('.')
        .map(decode_label)
        .collect::<Result<Vec<_>, _>>()?
        .join(".");
    check_host_chars(&decoded)?;
    Ok(decoded)
}

fn decode_label(label: &str) -> Result<String, UrlError> {
    let decoded = punycode_decode(label)?;
    // An `xn--` label must decode to something that encodes back to it:
    // not empty, and not another ASCII `xn--` label.
    if has_ace_prefix(label)
        && (decoded.is_empty() || (decoded.is_ascii() && has_ace_prefix(&decoded)))
    {
        return Err(UrlError::InvalidPunycode(label.to_string()));
    }
    punycode_encode(&decoded)?;
    Ok(decoded)
}

/// Reject ASCII characters other than alphanumerics, `-`, `_` and `.`.
pub fn check_host_chars(host: &str) -> Result<(), UrlError> {
    match host
        .chars()
        .find(|&c| c.is_ascii() && !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        Some(c) => Err(UrlError::IllegalHostCharacter(c)),
        None => Ok(()),
    }
}
