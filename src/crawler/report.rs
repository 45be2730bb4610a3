//! Summary of a finished crawl run

use crate::crawler::frontier::Frontier;
use chrono::{DateTime, Utc};

/// A `parent -> child` link discovered during the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub parent: String,
    pub child: String,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed's resolved URL
    pub seed: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Number of pages whose results were processed
    pub pages_crawled: u64,
    /// Edges in the order they were logged
    pub edges: Vec<Edge>,
    /// Links dropped by robots.txt
    pub blocked: Vec<String>,
    /// Every URL seen, with occurrence counts
    pub frontier: Frontier,
}

impl CrawlReport {
    /// Wall-clock time between start and finish
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Children reported for `parent`, in discovery order
    pub fn children_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.parent == parent)
            .map(|edge| edge.child.as_str())
    }
}
