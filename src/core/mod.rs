//! Encodings used inside URLs.
//!
//! This module contains the two transfer syntaxes the parser and serializer
//! rely on:
//! - Percent-encoding of path, query, fragment and userinfo components
//! - Punycode for internationalized domain labels

pub mod percent;
pub mod punycode;

// Re-export main functionality
pub use percent::{percent_decode, percent_encode};
pub use punycode::{punycode_decode, punycode_encode};
