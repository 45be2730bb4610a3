//! URL handling module for site-tree
//!
//! This module turns raw hrefs and seed strings into absolute URLs and splits them
//! into protocol, host, path and public-suffix based domain parts.
//!
//! Resolution is deliberately shallow: relative references are joined onto their
//! page's host and schemeless references get a protocol, but nothing is case-folded,
//! reordered or trimmed. Two URLs are the same page only if their resolved strings
//! are byte-for-byte equal.

mod domain;
mod resolve;
mod suffix;

use once_cell::sync::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};

pub use domain::{extract_parts, host_of, split_host, split_host_with, DomainParts};
pub use resolve::{resolve, scheme_of, DEFAULT_PROTOCOL};
pub use suffix::{
    active_suffix_list, install_suffix_list, install_suffix_list_from, SuffixList,
};

/// Outcome of resolving a raw href
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The href was missing or empty
    Empty,
    /// A fully qualified URL
    Absolute(String),
    /// No host could anchor the href (e.g. a relative path with no page context)
    Unresolvable(String),
}

impl Resolution {
    /// The string form: the absolute URL, the raw input when unresolvable, or `""`
    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Absolute(url) | Self::Unresolvable(url) => url,
        }
    }

    /// Returns true if the href resolved to something that can be fetched
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Absolute(_))
    }
}

/// A URL as found in a page or given as a seed, with its resolution context
///
/// Resolution happens on first access and is cached, so every accessor sees the same
/// absolute string.
///
/// # Examples
///
/// ```
/// use site_tree::url::Url;
///
/// let link = Url::with_context("/about", "example.com", "https");
/// assert_eq!(link.as_str(), "https://example.com/about");
/// assert_eq!(link.domain(), "example");
/// assert_eq!(link.suffix(), "com");
/// ```
#[derive(Debug, Clone)]
pub struct Url {
    raw: String,
    base_host: Option<String>,
    protocol: String,
    resolved: OnceCell<Resolution>,
    parsed: OnceCell<Option<::url::Url>>,
    parts: OnceCell<DomainParts>,
}

impl Url {
    /// Creates a URL with no resolution context and the default protocol
    pub fn new(raw: impl Into<String>) -> Self {
        Self::build(raw.into(), None, DEFAULT_PROTOCOL)
    }

    /// Creates a URL whose schemeless form will be completed with `protocol`
    pub fn with_protocol(raw: impl Into<String>, protocol: &str) -> Self {
        Self::build(raw.into(), None, protocol)
    }

    /// Creates a URL found on a page served from `base_host` over `protocol`
    pub fn with_context(raw: impl Into<String>, base_host: &str, protocol: &str) -> Self {
        Self::build(raw.into(), Some(base_host.to_string()), protocol)
    }

    fn build(raw: String, base_host: Option<String>, protocol: &str) -> Self {
        let protocol = if protocol.is_empty() {
            DEFAULT_PROTOCOL
        } else {
            protocol
        };

        Self {
            raw,
            base_host: base_host.filter(|h| !h.is_empty()),
            protocol: protocol.to_string(),
            resolved: OnceCell::new(),
            parsed: OnceCell::new(),
            parts: OnceCell::new(),
        }
    }

    /// The input exactly as given
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Resolves the URL once and returns the cached outcome
    pub fn resolution(&self) -> &Resolution {
        self.resolved
            .get_or_init(|| resolve(&self.raw, self.base_host.as_deref(), &self.protocol))
    }

    /// The resolved absolute string (see [`Resolution::as_str`])
    pub fn as_str(&self) -> &str {
        self.resolution().as_str()
    }

    /// Returns true if the URL resolved to something fetchable
    pub fn is_usable(&self) -> bool {
        self.resolution().is_usable()
    }

    /// The resolved URL parsed by the `url` crate
    ///
    /// `None` unless the resolution is absolute and well-formed.
    pub fn as_url(&self) -> Option<&::url::Url> {
        self.parsed
            .get_or_init(|| match self.resolution() {
                Resolution::Absolute(absolute) => ::url::Url::parse(absolute).ok(),
                _ => None,
            })
            .as_ref()
    }

    /// The scheme, falling back to the construction protocol when there is none
    pub fn protocol(&self) -> String {
        if let Some(parsed) = self.as_url() {
            return parsed.scheme().to_string();
        }
        match scheme_of(self.as_str()) {
            "" => self.protocol.clone(),
            scheme => scheme.to_ascii_lowercase(),
        }
    }

    /// The network location (`host[:port]`)
    ///
    /// Default ports are omitted. Empty when the URL could not be parsed or has no host.
    pub fn host(&self) -> String {
        let Some(parsed) = self.as_url() else {
            return String::new();
        };
        match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        }
    }

    /// The path, without query or fragment
    ///
    /// Empty when the URL could not be parsed.
    pub fn path(&self) -> &str {
        self.as_url().map(::url::Url::path).unwrap_or_default()
    }

    /// The registrable domain label (`google` for `www.google.co.uk`)
    ///
    /// Logs an error and returns an empty string when there is no domain label.
    pub fn domain(&self) -> &str {
        let domain = &self.parts().domain;
        if domain.is_empty() {
            tracing::error!("URL without domain {}", self.as_str());
        }
        domain
    }

    /// The labels left of the domain (`www.fake` for `www.fake.google.com`)
    pub fn subdomain(&self) -> &str {
        &self.parts().subdomain
    }

    /// The public suffix (`co.uk` for `www.google.co.uk`)
    pub fn suffix(&self) -> &str {
        &self.parts().suffix
    }

    /// Domain label plus public suffix (`google.co.uk`), the key for domain scoping
    pub fn registrable_domain(&self) -> String {
        let domain = self.domain();
        let suffix = self.suffix();
        if domain.is_empty() || suffix.is_empty() {
            domain.to_string()
        } else {
            format!("{}.{}", domain, suffix)
        }
    }

    fn parts(&self) -> &DomainParts {
        self.parts.get_or_init(|| extract_parts(self.as_str()))
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Url {}

impl Hash for Url {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}
