//! HTML link extraction
//!
//! Pages are parsed leniently with scraper (html5ever), so broken markup still
//! yields whatever anchors can be recovered.

use crate::url::Url;
use scraper::{Html, Selector};

/// Extracts every anchor's href from a page, resolved against that page
///
/// Each `<a>` element contributes one candidate. Anchors without an href, and hrefs
/// that cannot be resolved, are logged and left out. Order follows the document.
///
/// # Arguments
///
/// * `html` - The page content
/// * `page` - The page the content came from; its host and protocol anchor relative links
///
/// # Example
///
/// ```
/// use site_tree::crawler::extract_links;
/// use site_tree::url::Url;
///
/// let page = Url::new("http://example.com");
/// let links = extract_links(r#"<a href="/about">About</a>"#, &page);
/// assert_eq!(links[0].as_str(), "http://example.com/about");
/// ```
pub fn extract_links(html: &str, page: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(anchor_selector) = Selector::parse("a") else {
        return Vec::new();
    };

    let host = page.host();
    let protocol = page.protocol();

    document
        .select(&anchor_selector)
        .filter_map(|element| {
            let href = element.value().attr("href").unwrap_or_default();
            let link = Url::with_context(href, &host, &protocol);
            if link.is_usable() {
                Some(link)
            } else {
                tracing::error!("Failed to process {:?} on {}", href, page);
                None
            }
        })
        .collect()
}
