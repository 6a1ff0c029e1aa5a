//! weburl - forgiving URL parsing with internationalized domain names
//!
//! This crate turns arbitrary user-typed or scraped strings into a structured
//! [`Url`] and back again, in both a machine-usable ASCII form and a
//! human-readable Unicode form.
//!
//! # Features
//!
//! - **Forgiving input**: `example.org` is a complete URL; the scheme defaults to `http`
//! - **Host splitting**: hosts are split into subdomain, host and tld using a table of known suffixes
//! - **IDN support**: `xn--` labels are decoded on parse and re-encoded on output
//! - **Value semantics**: a `Url` owns all of its data and cloning is a deep copy
//! - **Resolution**: append path segments and resolve relative references
//!
//! # Quick Start
//!
//! ```
//! use weburl::parse_url;
//!
//! let url = parse_url("https://api.☃.com:8443/v1/items?page=2#top")?;
//! assert_eq!(url.subdomain, "api");
//! assert_eq!(url.host, "☃");
//! assert_eq!(url.tld, "com");
//! assert_eq!(url.port(), 8443);
//! assert_eq!(url.query_params.get("page"), Some("2"));
//!
//! assert_eq!(url.to_string(), "https://api.xn--n3h.com:8443/v1/items?page=2#top");
//! assert_eq!(url.to_human_readable_string(), "https://api.☃.com:8443/v1/items?page=2#top");
//!
//! let next = url.resolve("../v2/items")?;
//! assert_eq!(next.to_string(), "https://api.xn--n3h.com:8443/v2/items");
//! # Ok::<(), weburl::UrlError>(())
//! ```
//!
//! # Comparison
//!
//! Two URLs are equal when their full host, scheme, effective port, userinfo,
//! path and query parameters match. The fragment is ignored, and query
//! parameter order matters.
//!
//! # Error Handling
//!
//! All fallible functions return `Result<T, UrlError>`. Common error cases:
//!
//! - Truncated or non-hex percent escapes, or escapes that decode to invalid UTF-8
//! - Ports that are not unsigned 16-bit integers
//! - Unterminated or malformed IPv6 literals
//! - Disallowed ASCII characters in host labels

// Re-export main parsing functions
pub use crate::url::{parse_url, parse_url_or_panic, parse_url_with};

// Re-export host classification
pub use crate::url::{classify_host, decode_host, HostParts, TldTable};

// Re-export essential URL utilities
pub use crate::url::{
    get_anchor, get_filename, get_path_segments, get_query_value, has_anchor, has_query,
    is_https, join_url_path, strip_anchor,
};

// Re-export public types
pub use crate::error::UrlError;
pub use crate::types::{default_port, QueryParams, Url};
pub use crate::core::{percent_decode, percent_encode, punycode_decode, punycode_encode};

// Module declarations
pub mod error;
pub mod types;
pub mod core;
pub mod url;
