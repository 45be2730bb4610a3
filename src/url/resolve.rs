//! Resolution of raw hrefs into absolute URLs
//!
//! Resolution never fails hard: an href that cannot be anchored anywhere comes back
//! as [`Resolution::Unresolvable`] and the caller decides whether to drop it.

use crate::url::domain::extract_parts;
use crate::url::Resolution;

/// Protocol assumed when neither the href nor its context carries one
pub const DEFAULT_PROTOCOL: &str = "http";

/// Returns the scheme of `raw`, or an empty string if it has none
///
/// A scheme is a leading ASCII letter followed by letters, digits, `+`, `-` or `.`,
/// terminated by `:`.
///
/// # Examples
///
/// ```
/// use site_tree::url::scheme_of;
///
/// assert_eq!(scheme_of("https://example.com"), "https");
/// assert_eq!(scheme_of("tel:+123456"), "tel");
/// assert_eq!(scheme_of("//example.com/a"), "");
/// assert_eq!(scheme_of("/a:b"), "");
/// ```
pub fn scheme_of(raw: &str) -> &str {
    let Some((candidate, _)) = raw.split_once(':') else {
        return "";
    };

    let mut chars = candidate.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if starts_alpha && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        candidate
    } else {
        ""
    }
}

/// Resolves `raw` against an optional base host using `protocol` as the fallback scheme
///
/// # Resolution Rules
///
/// 1. Empty input resolves to [`Resolution::Empty`]
/// 2. With a base host, input lacking a domain label or a known public suffix is a
///    relative reference, joined onto `protocol://base_host`
/// 3. Without a base host, input lacking a domain label is unresolvable
/// 4. Input with a domain but no scheme (`//host/x`, `host/x`) gets `protocol`
/// 5. Anything else is already absolute and is returned unchanged
pub fn resolve(raw: &str, base_host: Option<&str>, protocol: &str) -> Resolution {
    if raw.is_empty() {
        return Resolution::Empty;
    }

    let parts = extract_parts(raw);
    let looks_relative = parts.domain.is_empty() || parts.suffix.is_empty();

    match base_host {
        Some(host) if !host.is_empty() && looks_relative => join_relative(raw, host, protocol),
        _ if parts.domain.is_empty() => {
            tracing::error!(
                "Relative paths require a protocol and domain to be specified: {}",
                raw
            );
            Resolution::Unresolvable(raw.to_string())
        }
        _ if scheme_of(raw).is_empty() => {
            let absolute = if raw.starts_with("//") {
                format!("{}:{}", protocol, raw)
            } else {
                format!("{}://{}", protocol, raw)
            };
            Resolution::Absolute(absolute)
        }
        _ => Resolution::Absolute(raw.to_string()),
    }
}

/// Joins a relative reference onto `protocol://host`
fn join_relative(raw: &str, host: &str, protocol: &str) -> Resolution {
    let base = format!("{}://{}", protocol, host);
    match ::url::Url::parse(&base).and_then(|base_url| base_url.join(raw)) {
        Ok(joined) => Resolution::Absolute(joined.to_string()),
        Err(e) => {
            tracing::error!("Failed to resolve {} against {}: {}", raw, base, e);
            Resolution::Unresolvable(raw.to_string())
        }
    }
}
