use serde::Deserialize;
use std::path::PathBuf;

/// User agent sent with every page and robots.txt request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Upper bound accepted for an explicit worker count
pub const MAX_WORKERS: usize = 512;

/// Main configuration structure for site-tree
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of parallel workers (defaults to twice the available parallelism)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Only follow links whose registrable domain matches the seed's
    #[serde(rename = "limit-to-domain", default)]
    pub limit_to_domain: bool,

    /// Honour the seed host's robots.txt (forces a single worker)
    #[serde(default)]
    pub robots: bool,

    /// Report links found on the seed page without following them
    #[serde(rename = "single-depth", default)]
    pub single_depth: bool,

    /// User agent for outbound requests
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Local public suffix list file replacing the bundled snapshot
    #[serde(rename = "suffix-list", default)]
    pub suffix_list: Option<PathBuf>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: None,
            limit_to_domain: false,
            robots: false,
            single_depth: false,
            user_agent: default_user_agent(),
            suffix_list: None,
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Twice the available hardware parallelism, or 2 if it cannot be queried
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() * 2)
        .unwrap_or(2)
}

/// Command-line values layered over the file configuration
///
/// Boolean flags can only switch a mode on; a mode enabled in the file stays enabled.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub workers: Option<usize>,
    pub limit_to_domain: bool,
    pub robots: bool,
    pub single_depth: bool,
}

impl CrawlerConfig {
    /// Applies command-line overrides on top of this configuration
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(workers) = overrides.workers {
            self.workers = Some(workers);
        }
        self.limit_to_domain |= overrides.limit_to_domain;
        self.robots |= overrides.robots;
        self.single_depth |= overrides.single_depth;
    }

    /// Resolves the number of workers the pool will actually start
    ///
    /// Robots mode always gets exactly one worker so crawl-delay pacing applies to a
    /// single request stream.
    pub fn effective_workers(&self) -> usize {
        if self.robots {
            if matches!(self.workers, Some(n) if n != 1) {
                tracing::warn!("Robots mode enabled, ignoring worker override and using 1 worker");
            }
            return 1;
        }
        self.workers.unwrap_or_else(default_worker_count)
    }
}
