//! Turning a [`Url`] back into text.
//!
//! Two forms exist. The machine form is what goes on the wire: host labels are
//! punycode-encoded and every other component is percent-encoded. The
//! human-readable form shows Unicode hosts, userinfo, path and fragment as-is
//! and only percent-encodes the query.

use std::fmt;

use tracing::debug;

use crate::core::percent::percent_encode;
use crate::core::punycode::punycode_encode;
use crate::error::UrlError;
use crate::types::{default_port, Url};
use crate::url::host::check_host_chars;

impl Url {
    /// Serialize in machine (`human_readable == false`) or human-readable form.
    ///
    /// Only the machine form can fail, when a host label cannot be encoded.
    pub fn to_string_checked(&self, human_readable: bool) -> Result<String, UrlError> {
        if human_readable {
            return Ok(self.to_human_readable_string());
        }
        let host = self.ascii_host()?;
        Ok(self.assemble(&host, false))
    }

    /// Serialize with Unicode hosts and unescaped userinfo, path and fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use weburl::parse_url;
    ///
    /// let url = parse_url("http://xn--n3h.com/a%20b")?;
    /// assert_eq!(url.to_string(), "http://xn--n3h.com/a%20b");
    /// assert_eq!(url.to_human_readable_string(), "http://☃.com/a b");
    /// # Ok::<(), weburl::UrlError>(())
    /// ```
    pub fn to_human_readable_string(&self) -> String {
        self.assemble(&self.full_host(), true)
    }

    /// The encoded path followed by the query string, if any.
    pub fn to_path_and_query_string(&self) -> String {
        let mut out = String::new();
        self.write_path(&mut out, false);
        self.write_query(&mut out);
        out
    }

    /// The full host with every label in its ASCII form.
    pub fn ascii_host(&self) -> Result<String, UrlError> {
        if self.host.starts_with('[') {
            return Ok(self.host.clone());
        }
        let labels = self
            .full_host()
            .split('.')
            .map(|label| {
                check_host_chars(label)?;
                punycode_encode(label)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(labels.join("."))
    }

    fn assemble(&self, host: &str, human_readable: bool) -> String {
        let encode = |s: &str| {
            if human_readable {
                s.to_string()
            } else {
                percent_encode(s)
            }
        };

        let mut out = String::with_capacity(host.len() + self.path.len() + 16);
        out.push_str(&self.scheme);
        out.push_str("://");

        if let Some(user) = &self.user {
            out.push_str(&encode(user));
            if let Some(pass) = &self.pass {
                out.push(':');
                out.push_str(&encode(pass));
            }
            out.push('@');
        }

        out.push_str(host);
        if let Some(port) = self.provided_port {
            if default_port(&self.scheme) != Some(port) {
                out.push(':');
                out.push_str(&port.to_string());
            }
        }

        self.write_path(&mut out, human_readable);
        self.write_query(&mut out);

        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&encode(&self.fragment));
        }
        out
    }

    fn write_path(&self, out: &mut String, human_readable: bool) {
        out.push('/');
        let path = self.path.strip_prefix('/').unwrap_or(&self.path);
        if human_readable {
            out.push_str(path);
        } else {
            let segments: Vec<String> = path.split('/').map(percent_encode).collect();
            out.push_str(&segments.join("/"));
        }
    }

    // The query is always encoded, whatever the mode.
    fn write_query(&self, out: &mut String) {
        if self.query_params.is_empty() {
            return;
        }
        out.push('?');
        for (i, (key, value)) in self.query_params.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(&percent_encode(key));
            out.push('=');
            out.push_str(&percent_encode(value));
        }
    }
}

/// Writes the machine form.
///
/// A parsed `Url` always has an encodable host. A hand-built one whose host
/// cannot be encoded is written with the host as-is; use
/// [`Url::to_string_checked`] to get the error instead.
impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = match self.ascii_host() {
            Ok(host) => host,
            Err(err) => {
                debug!(error = %err, "host cannot be encoded, writing it unencoded");
                self.full_host()
            }
        };
        f.write_str(&self.assemble(&host, false))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = self
            .to_string_checked(false)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        crate::url::parser::parse_url(&s).map_err(serde::de::Error::custom)
    }
}
