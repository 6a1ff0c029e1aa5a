//! String-in, string-out shortcuts over [`parse_url`].
//!
//! Handy when a caller only needs one piece of a URL and doesn't want to
//! hold on to a [`Url`](crate::Url).

use crate::error::UrlError;
use crate::url::parser::parse_url;

/// Split a URL's path into its non-empty, decoded segments.
///
/// # Examples
///
/// ```
/// use weburl::get_path_segments;
///
/// let segments = get_path_segments("https://example.com/api/v1/users").unwrap();
/// assert_eq!(segments, vec!["api", "v1", "users"]);
/// ```
pub fn get_path_segments(url: &str) -> Result<Vec<String>, UrlError> {
    let parsed = parse_url(url)?;
    Ok(parsed.path_segments().into_iter().map(str::to_string).collect())
}

/// The last path segment, when it looks like a file name.
///
/// # Examples
///
/// ```
/// use weburl::get_filename;
///
/// assert_eq!(get_filename("https://example.com/docs/file.pdf").unwrap(), Some("file.pdf".to_string()));
/// assert_eq!(get_filename("https://example.com/api/users/").unwrap(), None);
/// ```
pub fn get_filename(url: &str) -> Result<Option<String>, UrlError> {
    let parsed = parse_url(url)?;
    Ok(parsed.filename().map(str::to_string))
}

/// First value of a query parameter.
///
/// # Examples
///
/// ```
/// use weburl::get_query_value;
///
/// let value = get_query_value("https://example.com?page=2&sort=name", "page").unwrap();
/// assert_eq!(value, Some("2".to_string()));
/// ```
pub fn get_query_value(url: &str, key: &str) -> Result<Option<String>, UrlError> {
    let parsed = parse_url(url)?;
    Ok(parsed.query_params.get(key).map(str::to_string))
}

/// The decoded fragment, if there is one.
pub fn get_anchor(url: &str) -> Result<Option<String>, UrlError> {
    let parsed = parse_url(url)?;
    Ok(Some(parsed.fragment).filter(|f| !f.is_empty()))
}

/// The canonical form of `url` without its fragment.
///
/// # Examples
///
/// ```
/// use weburl::strip_anchor;
///
/// assert_eq!(strip_anchor("https://example.com/page#section").unwrap(), "https://example.com/page");
/// ```
pub fn strip_anchor(url: &str) -> Result<String, UrlError> {
    parse_url(url)?.without_fragment().to_string_checked(false)
}

/// Join a base URL and a path segment with exactly one `/` between them.
///
/// # Examples
///
/// ```
/// use weburl::join_url_path;
///
/// assert_eq!(join_url_path("https://api.example.com/v1", "users").unwrap(), "https://api.example.com/v1/users");
/// assert_eq!(join_url_path("https://api.example.com/v1/", "/users").unwrap(), "https://api.example.com/v1/users");
/// ```
pub fn join_url_path(base_url: &str, path: &str) -> Result<String, UrlError> {
    parse_url(base_url)?.append_path(path).to_string_checked(false)
}

/// Whether the URL's scheme is `https`. Unparsable input is not.
pub fn is_https(url: &str) -> bool {
    parse_url(url).map_or(false, |u| u.is_https())
}

/// Whether the URL carries at least one query parameter.
pub fn has_query(url: &str) -> bool {
    parse_url(url).map_or(false, |u| u.has_query())
}

/// Whether the URL carries a non-empty fragment.
pub fn has_anchor(url: &str) -> bool {
    parse_url(url).map_or(false, |u| u.has_fragment())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_path_segments() {
        let segments = get_path_segments("https://example.com/api/v1/users").unwrap();
        assert_eq!(segments, vec!["api", "v1", "users"]);

        let empty = get_path_segments("https://example.com/").unwrap();
        assert_eq!(empty, Vec::<String>::new());

        let decoded = get_path_segments("https://example.com/a%20b/c").unwrap();
        assert_eq!(decoded, vec!["a b", "c"]);
    }

    #[test]
    fn test_get_filename() {
        let filename = get_filename("https://example.com/docs/file.pdf").unwrap();
        assert_eq!(filename, Some("file.pdf".to_string()));

        let no_file = get_filename("https://example.com/api/users/").unwrap();
        assert_eq!(no_file, None);

        let single_segment = get_filename("https://example.com/file").unwrap();
        assert_eq!(single_segment, Some("file".to_string()));
    }

    #[test]
    fn test_get_query_value() {
        let value = get_query_value("https://example.com?page=2&sort=name", "page").unwrap();
        assert_eq!(value, Some("2".to_string()));

        let missing = get_query_value("https://example.com?page=2", "missing").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_anchor_operations() {
        let anchor = get_anchor("https://docs.rs/serde#examples").unwrap();
        assert_eq!(anchor, Some("examples".to_string()));

        let no_anchor = get_anchor("https://example.com").unwrap();
        assert_eq!(no_anchor, None);

        let clean = strip_anchor("https://example.com/page?a=1#section").unwrap();
        assert_eq!(clean, "https://example.com/page?a=1");
    }

    #[test]
    fn test_join_url_path() {
        let url1 = join_url_path("https://api.example.com/v1", "users").unwrap();
        assert_eq!(url1, "https://api.example.com/v1/users");

        let url2 = join_url_path("https://api.example.com/v1/", "users").unwrap();
        assert_eq!(url2, "https://api.example.com/v1/users");
    }

    #[test]
    fn test_url_checks() {
        assert!(is_https("https://example.com"));
        assert!(!is_https("http://example.com"));
        assert!(!is_https("https://[::1"));

        assert!(has_query("https://example.com?foo=bar"));
        assert!(!has_query("https://example.com"));

        assert!(has_anchor("https://example.com#section"));
        assert!(!has_anchor("https://example.com"));
    }

    #[test]
    fn test_errors_propagate() {
        assert_eq!(get_path_segments("http://example.org:99999/"), Err(UrlError::InvalidPort("99999".to_string())));
    }
}
