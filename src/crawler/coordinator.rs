//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns everything that is not shared with the workers: the
//! Frontier, the robots policy and the count of outstanding jobs. A run moves
//! through four phases:
//!
//! - `Init`: resolve the seed, fetch robots.txt if enabled, start the pool, queue the seed
//! - `Running`: consume one result at a time, filter its links and queue new pages
//! - `Draining`: send one shutdown sentinel per worker and wait for the queue to drain
//! - `Done`: hand the report back to the caller
//!
//! The run ends when every queued page has reported back and no new page was found.

use crate::config::{validate, Config, CrawlerConfig};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::frontier::{Frontier, Visit};
use crate::crawler::pool::WorkerPool;
use crate::crawler::report::{CrawlReport, Edge};
use crate::crawler::task::{CrawlResult, CrawlTask};
use crate::robots::RobotsPolicy;
use crate::url::{install_suffix_list_from, Url};
use crate::{CrawlError, UrlError};
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

/// Phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Init,
    Running,
    Draining,
    Done,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlerConfig,
    seed: Url,
    /// Registrable domain of the seed, the scope for `limit-to-domain`
    seed_domain: String,
    client: Client,
    robots: Option<RobotsPolicy>,
    frontier: Frontier,
    phase: CrawlPhase,
    edges: Vec<Edge>,
    blocked: Vec<String>,
}

impl Coordinator {
    /// Creates a coordinator for one run starting at `seed`
    ///
    /// # Arguments
    ///
    /// * `seed` - Starting URL; a schemeless seed gets `http`
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to [`run`](Coordinator::run)
    /// * `Err(CrawlError)` - Invalid configuration, unusable seed, or robots.txt
    ///   could not be fetched
    pub async fn new(seed: &str, config: Config) -> Result<Self, CrawlError> {
        validate(&config)?;
        let config = config.crawler;

        if let Some(path) = &config.suffix_list {
            install_suffix_list_from(path)?;
        }

        let seed = Url::new(seed);
        if !seed.is_usable() {
            return Err(UrlError::Unresolvable(seed.raw().to_string()).into());
        }
        let seed_domain = seed.registrable_domain();

        let client = build_http_client(&config.user_agent)?;

        let robots = if config.robots {
            let policy = RobotsPolicy::fetch(&client, &seed, &config.user_agent).await?;
            tracing::info!("Applying robots.txt rules from {} to every host", policy.source());
            if let Some(delay) = policy.crawl_delay() {
                tracing::info!("robots.txt asks for a crawl delay of {:?}", delay);
            }
            Some(policy)
        } else {
            None
        };

        Ok(Self {
            config,
            seed,
            seed_domain,
            client,
            robots,
            frontier: Frontier::new(),
            phase: CrawlPhase::Init,
            edges: Vec::new(),
            blocked: Vec::new(),
        })
    }

    /// The seed URL
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Current phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl to completion
    ///
    /// Fetch failures on individual pages are logged and never end the run. An
    /// error is returned only if the worker pool itself breaks down.
    pub async fn run(mut self) -> Result<CrawlReport, CrawlError> {
        let started_at = Utc::now();
        let workers = self.config.effective_workers();
        let throttle = self.throttle();

        tracing::info!("Crawling {} with {} workers", self.seed, workers);
        let pool = WorkerPool::start(workers, self.client.clone());

        self.mark_seed();
        pool.submit(CrawlTask::new(self.seed.clone())).await?;
        let mut outstanding_jobs: usize = 1;
        let mut pages_crawled: u64 = 0;

        self.transition(CrawlPhase::Running);
        while outstanding_jobs > 0 {
            let result = pool.next_result().await?;
            pages_crawled += 1;

            let links = self.select_links(&result);
            let mut dispatched = 0;

            for link in links {
                tracing::info!("{} -> {}", result.parent, link);
                self.edges.push(Edge {
                    parent: result.parent.clone(),
                    child: link.as_str().to_string(),
                });

                if self.config.single_depth {
                    continue;
                }

                if let Some(delay) = throttle {
                    if dispatched > 0 {
                        tracing::info!("Throttling for {:?} before {}", delay, link);
                        tokio::time::sleep(delay).await;
                    }
                }

                tracing::debug!("Scheduling {}", link);
                pool.submit(CrawlTask::new(link)).await?;
                outstanding_jobs += 1;
                dispatched += 1;
            }

            outstanding_jobs -= 1;
            tracing::debug!(
                "Finished {} ({} jobs outstanding)",
                result.parent,
                outstanding_jobs
            );
        }

        self.transition(CrawlPhase::Draining);
        pool.shutdown().await?;

        self.transition(CrawlPhase::Done);
        let report = CrawlReport {
            seed: self.seed.as_str().to_string(),
            started_at,
            finished_at: Utc::now(),
            pages_crawled,
            edges: self.edges,
            blocked: self.blocked,
            frontier: self.frontier,
        };

        tracing::info!(
            "Crawl completed: {} pages crawled, {} unique URLs seen in {}s",
            report.pages_crawled,
            report.frontier.len(),
            report.elapsed().num_seconds()
        );

        Ok(report)
    }

    /// Records the seed in the Frontier so links back to it are never re-queued
    fn mark_seed(&mut self) {
        self.frontier.mark_and_check(self.seed.as_str());
    }

    /// Filters a page's links down to the ones to report
    ///
    /// Links are checked against the domain scope, then recorded in the Frontier,
    /// then checked against robots.txt. A blocked link is still recorded, so it is
    /// never reconsidered.
    fn select_links(&mut self, result: &CrawlResult) -> Vec<Url> {
        let mut selected = Vec::new();

        for link in &result.urls {
            if self.config.limit_to_domain && link.registrable_domain() != self.seed_domain {
                tracing::trace!("Out of scope: {}", link);
                continue;
            }

            if self.frontier.mark_and_check(link.as_str()) == Visit::Seen {
                tracing::trace!("Already seen: {}", link);
                continue;
            }

            if let Some(robots) = &self.robots {
                if robots.should_block(link) {
                    tracing::info!("Blocked by robots.txt: {}", link);
                    self.blocked.push(link.as_str().to_string());
                    continue;
                }
            }

            selected.push(link.clone());
        }

        selected
    }

    /// Delay to leave between dispatches, if robots.txt asks for one
    fn throttle(&self) -> Option<Duration> {
        self.robots
            .as_ref()
            .and_then(RobotsPolicy::crawl_delay)
            .filter(|delay| !delay.is_zero())
    }

    fn transition(&mut self, next: CrawlPhase) {
        tracing::debug!("Crawl phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}
