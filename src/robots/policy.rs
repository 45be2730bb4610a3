//! Run-wide robots.txt policy
//!
//! The policy is fetched once from the seed's host when the crawl starts and then
//! consulted for every candidate URL, whatever host that URL lives on.

use crate::robots::RobotsRules;
use crate::url::Url;
use crate::CrawlError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Robots.txt rules for one user agent, fetched from the seed's host
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Where the rules were fetched from
    source: String,
    /// User agent the rules are evaluated for
    user_agent: String,
    rules: RobotsRules,
}

impl RobotsPolicy {
    /// Builds a policy from already-fetched rules
    pub fn new(source: impl Into<String>, user_agent: impl Into<String>, rules: RobotsRules) -> Self {
        Self {
            source: source.into(),
            user_agent: user_agent.into(),
            rules,
        }
    }

    /// Fetches and parses `scheme://host/robots.txt` for the seed URL
    ///
    /// # Status Handling
    ///
    /// | Response | Policy |
    /// |----------|--------|
    /// | 2xx | Parsed from the body |
    /// | 401, 403 | Everything disallowed |
    /// | Other 4xx | Everything allowed |
    /// | 5xx, 3xx left unresolved, transport error | Error |
    ///
    /// # Returns
    ///
    /// * `Ok(RobotsPolicy)` - The policy for this run
    /// * `Err(CrawlError::Robots)` - robots.txt could not be retrieved
    pub async fn fetch(client: &Client, seed: &Url, user_agent: &str) -> Result<Self, CrawlError> {
        let source = robots_url(seed)?;
        tracing::info!("Fetching robots.txt from {}", source);

        let response = client
            .get(&source)
            .send()
            .await
            .map_err(|e| CrawlError::Robots {
                url: source.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let rules = if status.is_success() {
            let body = response.text().await.map_err(|e| CrawlError::Robots {
                url: source.clone(),
                message: e.to_string(),
            })?;
            RobotsRules::from_content(&body)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!("robots.txt at {} is restricted ({}), disallowing all", source, status);
            RobotsRules::disallow_all()
        } else if status.is_client_error() {
            tracing::info!("No robots.txt at {} ({}), allowing all", source, status);
            RobotsRules::allow_all()
        } else {
            return Err(CrawlError::Robots {
                url: source,
                message: format!("unexpected status {}", status),
            });
        };

        Ok(Self::new(source, user_agent, rules))
    }

    /// Where the rules were fetched from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the rules disallow this policy's user agent from `url`
    pub fn should_block(&self, url: &Url) -> bool {
        !self.rules.is_allowed(url.as_str(), &self.user_agent)
    }

    /// The Crawl-delay that applies to this policy's user agent
    pub fn crawl_delay(&self) -> Option<Duration> {
        self.rules
            .crawl_delay(&self.user_agent)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

/// The robots.txt location for the host serving `seed`
pub fn robots_url(seed: &Url) -> Result<String, CrawlError> {
    let base = seed
        .as_url()
        .filter(|parsed| parsed.has_host())
        .ok_or_else(|| CrawlError::Robots {
            url: seed.as_str().to_string(),
            message: "seed URL has no host".to_string(),
        })?;
    Ok(base.join("/robots.txt")?.to_string())
}
