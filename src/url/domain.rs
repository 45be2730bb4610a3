use crate::url::suffix::{active_suffix_list, SuffixList};
use std::net::IpAddr;

/// A host split into subdomain, registrable label and public suffix
///
/// `www.google.co.uk` splits into `www` / `google` / `co.uk`. Hosts ending in a label
/// the suffix list does not know keep their last label as the domain and an empty
/// suffix, the same shape a bare relative href such as `page2` produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

/// Extracts the host portion of a possibly partial URL
///
/// Works on hrefs as written: the scheme is optional, and userinfo, port, path,
/// query and fragment are discarded. Returns an empty string for path-only input.
///
/// # Examples
///
/// ```
/// use site_tree::url::host_of;
///
/// assert_eq!(host_of("https://user@www.example.com:8080/a?b#c"), "www.example.com");
/// assert_eq!(host_of("//cdn.example.com/lib.js"), "cdn.example.com");
/// assert_eq!(host_of("/relative/path"), "");
/// ```
pub fn host_of(raw: &str) -> &str {
    let rest = strip_scheme(raw.trim());
    let end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
    let netloc = &rest[..end];
    let netloc = netloc.rsplit('@').next().unwrap_or(netloc);

    let host = if let Some(bracketed) = netloc.strip_prefix('[') {
        bracketed.split(']').next().unwrap_or(bracketed)
    } else {
        netloc.split(':').next().unwrap_or(netloc)
    };

    host.trim_end_matches('.')
}

fn strip_scheme(s: &str) -> &str {
    if let Some(rest) = s.strip_prefix("//") {
        return rest;
    }
    if let Some((scheme, rest)) = s.split_once("://") {
        if !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return rest;
        }
    }
    s
}

/// Splits a lowercase host using the active public suffix list
pub fn split_host(host: &str) -> DomainParts {
    split_host_with(active_suffix_list(), host)
}

/// Splits a lowercase host using the given suffix list
pub fn split_host_with(list: Option<&SuffixList>, host: &str) -> DomainParts {
    if host.is_empty() {
        return DomainParts::default();
    }

    if host.parse::<IpAddr>().is_ok() {
        return DomainParts {
            domain: host.to_string(),
            ..DomainParts::default()
        };
    }

    let suffix = list.and_then(|l| l.known_suffix(host));
    let rest = match suffix {
        Some(suffix) if suffix.len() == host.len() => {
            return DomainParts {
                suffix: host.to_string(),
                ..DomainParts::default()
            };
        }
        Some(suffix) => host
            .strip_suffix(suffix)
            .and_then(|r| r.strip_suffix('.'))
            .unwrap_or(host),
        None => host,
    };

    let (subdomain, domain) = rest.rsplit_once('.').unwrap_or(("", rest));

    DomainParts {
        subdomain: subdomain.to_string(),
        domain: domain.to_string(),
        suffix: suffix.unwrap_or_default().to_string(),
    }
}

/// Decomposes a possibly partial URL into its domain parts
pub fn extract_parts(raw: &str) -> DomainParts {
    split_host(&host_of(raw).to_lowercase())
}
