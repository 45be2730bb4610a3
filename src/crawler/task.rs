//! Crawl tasks and their results

use crate::crawler::fetcher::{fetch_url, FetchResult};
use crate::crawler::parser::extract_links;
use crate::url::Url;
use reqwest::Client;

/// One page to fetch
///
/// The target URL doubles as the resolution context for links found on the page:
/// relative hrefs are joined onto its host and protocol.
#[derive(Debug, Clone)]
pub struct CrawlTask {
    target: Url,
}

/// Links discovered on one fetched page
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// Resolved URL of the page that was fetched
    pub parent: String,
    /// Resolved links, in document order
    pub urls: Vec<Url>,
}

impl CrawlTask {
    pub fn new(target: Url) -> Self {
        Self { target }
    }

    /// The page this task fetches
    pub fn url(&self) -> &Url {
        &self.target
    }

    /// Fetches the page and extracts its links
    ///
    /// Fetch failures are logged and produce a result with no links; they never
    /// abort the crawl.
    pub async fn execute(&self, client: &Client) -> CrawlResult {
        let parent = self.target.as_str().to_string();

        let urls = match fetch_url(client, &parent).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                if final_url != parent {
                    tracing::debug!("{} redirected to {}", parent, final_url);
                }
                extract_links(&body, &self.target)
            }
            FetchResult::HttpError { status_code } => {
                tracing::error!("HTTPError = {} for {}", status_code, parent);
                Vec::new()
            }
            FetchResult::NetworkError { error } => {
                tracing::error!("URLError = {} for {}", error, parent);
                Vec::new()
            }
        };

        CrawlResult { parent, urls }
    }
}
