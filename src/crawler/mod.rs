//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and link extraction
//! - The per-run Frontier of already seen URLs
//! - The worker pool and its task/result queues
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod pool;
mod report;
mod task;

pub use coordinator::{Coordinator, CrawlPhase};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::{Frontier, Visit};
pub use parser::extract_links;
pub use pool::{Job, TaskQueue, WorkerPool};
pub use report::{CrawlReport, Edge};
pub use task::{CrawlResult, CrawlTask};

use crate::config::Config;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and resolve the seed
/// 2. Fetch robots.txt if robots mode is enabled
/// 3. Start the worker pool
/// 4. Fetch pages and follow links until nothing new is found
/// 5. Shut the pool down and return the report
///
/// # Arguments
///
/// * `seed` - The URL to start from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed successfully
/// * `Err(CrawlError)` - Crawl could not start or the worker pool failed
pub async fn crawl(seed: &str, config: Config) -> Result<CrawlReport, CrawlError> {
    Coordinator::new(seed, config).await?.run().await
}
