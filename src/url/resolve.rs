//! Path appending and relative reference resolution.

use tracing::debug;

use crate::error::UrlError;
use crate::types::{QueryParams, Url};
use crate::url::parser::{parse_path_query_fragment, parse_url};

impl Url {
    /// Copy of this URL with `segment` appended to the path.
    ///
    /// Exactly one `/` separates the old path from the new segment, whether
    /// or not either side already had one. Query parameters are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use weburl::parse_url;
    ///
    /// let base = parse_url("https://api.example.com/v1/")?;
    /// assert_eq!(base.append_path("/users").to_string(), "https://api.example.com/v1/users");
    /// # Ok::<(), weburl::UrlError>(())
    /// ```
    pub fn append_path(&self, segment: &str) -> Url {
        let mut url = self.clone();
        url.push_path(segment);
        url
    }

    /// Append `segment` to the path in place.
    pub fn push_path(&mut self, segment: &str) {
        let segment = segment.trim_start_matches('/');
        let mut path = String::with_capacity(self.path.len() + segment.len() + 2);
        if !self.path.starts_with('/') {
            path.push('/');
        }
        path.push_str(self.path.trim_end_matches('/'));
        if !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(segment);
        self.path = path;
    }

    /// Resolve `reference` against this URL.
    ///
    /// - `//host/...` keeps this URL's scheme and replaces everything else.
    /// - A reference with `://` before its first `/` is parsed on its own.
    /// - Anything else replaces the path (relative to this URL's directory
    ///   unless it starts with `/`) and the query. The fragment is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use weburl::parse_url;
    ///
    /// let base = parse_url("https://example.org/docs/guide/intro?lang=en#top")?;
    /// assert_eq!(base.resolve("setup")?.to_string(), "https://example.org/docs/guide/setup");
    /// assert_eq!(base.resolve("../api?v=2")?.to_string(), "https://example.org/docs/api?v=2");
    /// assert_eq!(base.resolve("//cdn.example.net/x")?.to_string(), "https://cdn.example.net/x");
    /// # Ok::<(), weburl::UrlError>(())
    /// ```
    pub fn resolve(&self, reference: &str) -> Result<Url, UrlError> {
        if reference.is_empty() {
            return Ok(self.clone());
        }

        if reference.starts_with("//") {
            debug!(reference, "resolving scheme-relative reference");
            return parse_url(&format!("{}:{}", self.scheme, reference));
        }

        if let Some(sep) = reference.find("://") {
            if reference.find('/').map_or(true, |slash| sep < slash) {
                debug!(reference, "reference is absolute");
                return parse_url(reference);
            }
        }

        let mut url = self.clone();
        url.path.clear();
        url.query_params = QueryParams::new();
        url.fragment.clear();

        let mut target = if reference.starts_with('/') {
            reference.to_string()
        } else if self.path.is_empty() {
            format!("/{}", reference)
        } else if self.path.ends_with('/') {
            format!("{}{}", self.path, reference)
        } else {
            match self.path.rfind('/') {
                Some(slash) => format!("{}{}", &self.path[..=slash], reference),
                None => format!("/{}", reference),
            }
        };

        let path_end = target.find(|c: char| c == '?' || c == '#').unwrap_or(target.len());
        if target[..path_end].contains("/../") {
            target = format!(
                "{}{}",
                collapse_parent_segments(&target[..path_end]),
                &target[path_end..]
            );
        }
        debug!(%target, "resolved relative reference");

        parse_path_query_fragment(&mut url, &target)?;
        url.fragment.clear();
        Ok(url)
    }
}

/// Cancel each `..` against the nearest earlier segment still standing.
///
/// Empty segments never count as ancestors, and a `..` with nothing left to
/// cancel is dropped. The result is rooted and has no empty segments.
fn collapse_parent_segments(path: &str) -> String {
    let mut parts: Vec<Option<&str>> = path
        .split('/')
        .map(|s| if s.is_empty() { None } else { Some(s) })
        .collect();

    for i in 0..parts.len() {
        if parts[i] != Some("..") {
            continue;
        }
        parts[i] = None;
        if let Some(j) = (0..i).rev().find(|&j| parts[j].is_some()) {
            parts[j] = None;
        }
    }

    let kept: Vec<&str> = parts.into_iter().flatten().collect();
    format!("/{}", kept.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        parse_url(s).unwrap()
    }

    #[test]
    fn test_append_never_doubles_slashes() {
        for base in ["http://example.org/foo", "http://example.org/foo/"] {
            for segment in ["bar", "/bar"] {
                assert_eq!(
                    url(base).append_path(segment).to_string(),
                    "http://example.org/foo/bar",
                    "{} + {}",
                    base,
                    segment
                );
            }
        }
    }

    #[test]
    fn test_append_to_empty_path() {
        assert_eq!(url("http://example.org").append_path("bar").path, "/bar");
        assert_eq!(url("http://example.org/").append_path("bar").path, "/bar");
    }

    #[test]
    fn test_append_keeps_query_and_original() {
        let base = url("http://example.org/api?key=1");
        let joined = base.append_path("items");
        assert_eq!(joined.to_string(), "http://example.org/api/items?key=1");
        assert_eq!(base.path, "/api");
    }

    #[test]
    fn test_push_path_in_place() {
        let mut u = url("http://example.org/a?x=y");
        u.push_path("b/");
        u.push_path("c");
        assert_eq!(u.to_string(), "http://example.org/a/b/c?x=y");
    }

    #[test]
    fn test_resolve_drops_query_and_fragment() {
        let base = url("https://example.org/this?query=value");
        assert_eq!(base.resolve("that").unwrap().to_string(), "https://example.org/that");

        let base = url("https://example.org/dir/page#frag");
        assert_eq!(base.resolve("other#x").unwrap().to_string(), "https://example.org/dir/other");
    }

    #[test]
    fn test_resolve_relative_to_directory() {
        let base = url("https://example.org/docs/");
        assert_eq!(base.resolve("a/b").unwrap().path, "/docs/a/b");

        let root = url("https://example.org");
        assert_eq!(root.resolve("a").unwrap().path, "/a");
    }

    #[test]
    fn test_resolve_absolute_path() {
        let base = url("https://user@example.org:8443/docs/x?q=1");
        let resolved = base.resolve("/top?z=9").unwrap();
        assert_eq!(resolved.to_string(), "https://user@example.org:8443/top?z=9");
    }

    #[test]
    fn test_resolve_scheme_relative() {
        let base = url("https://example.org/docs");
        let resolved = base.resolve("//other.example.com/x").unwrap();
        assert_eq!(resolved.scheme, "https");
        assert_eq!(resolved.subdomain, "other");
        assert_eq!(resolved.to_string(), "https://other.example.com/x");
    }

    #[test]
    fn test_resolve_absolute_reference() {
        let base = url("https://example.org/docs");
        let resolved = base.resolve("http://elsewhere.net/a?b=c").unwrap();
        assert_eq!(resolved.to_string(), "http://elsewhere.net/a?b=c");

        // A "://" after the first slash is just part of the path.
        let resolved = base.resolve("go/http://x").unwrap();
        assert_eq!(resolved.host, "example");
        assert_eq!(resolved.path, "/go/http://x");
    }

    #[test]
    fn test_resolve_empty_reference() {
        let base = url("https://example.org/a?b=c#d");
        let resolved = base.resolve("").unwrap();
        assert_eq!(resolved.fragment, "d");
        assert_eq!(resolved, base);
    }

    #[test]
    fn test_resolve_parent_segments() {
        let base = url("https://example.org/a/b/c/page");
        assert_eq!(base.resolve("../x").unwrap().path, "/a/b/x");
        assert_eq!(base.resolve("../../x").unwrap().path, "/a/x");
        assert_eq!(base.resolve("/p/q/../r").unwrap().path, "/p/r");
    }

    #[test]
    fn test_parent_segments_in_query_are_kept() {
        let base = url("https://example.org/a/b/page");
        let resolved = base.resolve("../x?next=/c/../d").unwrap();
        assert_eq!(resolved.path, "/a/x");
        assert_eq!(resolved.query_params.get("next"), Some("/c/../d"));
    }

    #[test]
    fn test_excess_parent_segments_are_dropped() {
        let base = url("https://example.org/a/page");
        assert_eq!(base.resolve("../../../x").unwrap().path, "/x");
    }

    #[test]
    fn test_resolve_bad_escape() {
        let base = url("https://example.org/");
        assert_eq!(base.resolve("%zz"), Err(UrlError::MalformedPercentEncoding));
    }

    #[test]
    fn test_collapse_parent_segments() {
        assert_eq!(collapse_parent_segments("/a/b/../c"), "/a/c");
        assert_eq!(collapse_parent_segments("/a//../c"), "/c");
        assert_eq!(collapse_parent_segments("/../a/"), "/a");
        assert_eq!(collapse_parent_segments("/a/../../b/../c"), "/c");
    }
}
