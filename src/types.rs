//! Core data structures: the parsed URL and its query parameters.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Well-known port for a scheme, if it has one.
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

/// Ordered multi-map of decoded query parameters.
///
/// Keys may repeat and insertion order is kept; both matter for
/// serialization and comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, keeping any existing pairs with the same key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Replace every pair for `key` with a single pair at the end.
    pub fn overwrite(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.pairs.retain(|(k, _)| *k != key);
        self.pairs.push((key, value.into()));
    }

    /// First value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values stored for `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Remove every pair for `key`, returning how many were removed.
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|(k, _)| k != key);
        before - self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.add(k, v);
        }
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// A parsed URL.
///
/// All string fields hold decoded text: percent escapes are resolved and
/// host labels are Unicode. Fields are public so a `Url` can be built by
/// hand; `subdomain`, `host` and `tld` are only kept consistent by the parser.
#[derive(Debug, Clone, Default)]
pub struct Url {
    /// Lowercase scheme, `http` when the input had none.
    pub scheme: String,
    /// User name from the userinfo part.
    pub user: Option<String>,
    /// Password from the userinfo part; only meaningful with `user`.
    pub pass: Option<String>,
    /// Labels before the registrable host (`a.b` in `a.b.example.org`).
    pub subdomain: String,
    /// Registrable host label, or a bracketed IPv6 literal.
    pub host: String,
    /// Recognized suffix (`org`, `co.uk`), empty when none matched.
    pub tld: String,
    /// Port written in the source, `None` when absent.
    pub provided_port: Option<u16>,
    /// Decoded path; empty and `/` both mean the root.
    pub path: String,
    pub query_params: QueryParams,
    /// Decoded fragment without the leading `#`.
    pub fragment: String,
}

impl Url {
    /// The explicit port, or the scheme's well-known port, or 0.
    pub fn port(&self) -> u16 {
        self.provided_port
            .or_else(|| default_port(&self.scheme))
            .unwrap_or(0)
    }

    /// Subdomain, host and tld joined with dots, skipping empty parts.
    pub fn full_host(&self) -> String {
        [&self.subdomain, &self.host, &self.tld]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Non-empty path segments.
    pub fn path_segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// The last path segment when it looks like a file name.
    ///
    /// That is, it contains a dot or it is the only segment, and the path
    /// does not end with `/`.
    pub fn filename(&self) -> Option<&str> {
        if self.path.ends_with('/') {
            return None;
        }
        let segments = self.path_segments();
        let last = *segments.last()?;
        if last.contains('.') || segments.len() == 1 {
            Some(last)
        } else {
            None
        }
    }

    pub fn is_https(&self) -> bool {
        self.scheme == "https"
    }

    pub fn has_query(&self) -> bool {
        !self.query_params.is_empty()
    }

    pub fn has_fragment(&self) -> bool {
        !self.fragment.is_empty()
    }

    /// Copy of this URL with the fragment cleared.
    pub fn without_fragment(&self) -> Url {
        Url {
            fragment: String::new(),
            ..self.clone()
        }
    }

    fn sort_key(&self) -> (String, &str, u16, &Option<String>, &Option<String>, &str, &QueryParams) {
        (
            self.full_host(),
            &self.scheme,
            self.port(),
            &self.user,
            &self.pass,
            if self.path.is_empty() { "/" } else { self.path.as_str() },
            &self.query_params,
        )
    }
}

// Ordering ignores the fragment, compares the effective port and treats an
// empty path as `/`.
impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Url {}

impl PartialOrd for Url {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Url {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Hash for Url {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}
