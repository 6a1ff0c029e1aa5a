//! URL parsing, serialization and manipulation.
//!
//! This module contains URL-related functionality:
//! - Known-suffix table and host classification
//! - Parsing raw strings into [`Url`](crate::Url)
//! - Machine and human-readable serialization
//! - Path appending and relative resolution
//! - String-level convenience helpers

pub mod host;
pub mod parser;
pub mod resolve;
pub mod serialize;
pub mod utils;

// Re-export main functionality
pub use host::{classify_host, decode_host, HostParts, TldTable};
pub use parser::{parse_url, parse_url_or_panic, parse_url_with};
pub use utils::{
    get_anchor, get_filename, get_path_segments, get_query_value, has_anchor, has_query,
    is_https, join_url_path, strip_anchor,
};
