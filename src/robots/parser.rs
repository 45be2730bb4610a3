//! Robots.txt parser implementation
//!
//! Allow/Disallow matching is delegated to the robotstxt crate; Crawl-delay, which
//! that crate does not expose, is parsed here.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct RobotsRules {
    /// Raw robots.txt content
    content: String,
    /// Blanket verdict that overrides the content, if any
    verdict: Option<bool>,
}

impl RobotsRules {
    /// Creates rules from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            verdict: None,
        }
    }

    /// Creates permissive rules that allow everything
    ///
    /// Used when the site has no robots.txt (e.g. a 404).
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            verdict: Some(true),
        }
    }

    /// Creates rules that block everything
    ///
    /// Used when the robots.txt itself is access-restricted (401/403).
    pub fn disallow_all() -> Self {
        Self {
            content: String::new(),
            verdict: Some(false),
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The URL or path to check (e.g., "https://example.com/page.html")
    /// * `user_agent` - The user agent string
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if let Some(verdict) = self.verdict {
            return verdict;
        }
        if self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, product_token(user_agent), url)
    }

    /// Gets the crawl delay for a specific user agent
    ///
    /// # Returns
    ///
    /// * `Some(f64)` - The crawl delay in seconds, preferring a group naming the agent
    ///   over the `*` group
    /// * `None` - If no applicable crawl delay is specified
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        if self.verdict.is_some() || self.content.is_empty() {
            return None;
        }

        let agent = product_token(user_agent).to_lowercase();

        let mut group_agents: Vec<String> = Vec::new();
        let mut in_rules = false;
        let mut delay_for_wildcard: Option<f64> = None;
        let mut delay_for_agent: Option<f64> = None;

        for line in self.content.lines() {
            // Strip trailing comments
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // A user-agent line after rules starts a new group
                    if in_rules {
                        group_agents.clear();
                        in_rules = false;
                    }
                    group_agents.push(value.to_lowercase());
                }
                "crawl-delay" => {
                    in_rules = true;
                    let Ok(delay) = value.parse::<f64>() else {
                        continue;
                    };
                    if !delay.is_finite() || delay < 0.0 {
                        continue;
                    }

                    if group_agents.iter().any(|ua| ua != "*" && agent.contains(ua.as_str())) {
                        delay_for_agent = Some(delay);
                    } else if group_agents.iter().any(|ua| ua == "*") {
                        delay_for_wildcard = Some(delay);
                    }
                }
                _ => in_rules = true,
            }
        }

        delay_for_agent.or(delay_for_wildcard)
    }
}

/// The product token of a user agent (`Mozilla` for `Mozilla/5.0`)
fn product_token(user_agent: &str) -> &str {
    user_agent
        .split(|c: char| c == '/' || c.is_whitespace())
        .next()
        .unwrap_or(user_agent)
}
