//! Statistics derived from a crawl report

use crate::crawler::CrawlReport;
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Pages whose results were processed
    pub pages_crawled: u64,

    /// Distinct URLs recorded in the Frontier
    pub unique_urls: u64,

    /// Repeat sightings of already recorded URLs
    pub duplicate_hits: u64,

    /// Number of `parent -> child` edges reported
    pub total_edges: u64,

    /// Links dropped by robots.txt
    pub blocked_urls: u64,

    /// Distinct hosts among reported children
    pub unique_hosts: u64,

    /// Hosts with the most reported children, most first
    pub top_hosts: Vec<(String, u64)>,

    /// Elapsed wall-clock time in seconds
    pub elapsed_seconds: f64,
}

impl CrawlStatistics {
    /// Number of hosts kept in [`CrawlStatistics::top_hosts`]
    pub const TOP_HOSTS: usize = 5;

    /// Computes statistics for a finished run
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut hosts: HashMap<&str, u64> = HashMap::new();
        for edge in &report.edges {
            *hosts.entry(crate::url::host_of(&edge.child)).or_default() += 1;
        }

        let mut top_hosts: Vec<(String, u64)> = hosts
            .iter()
            .map(|(host, count)| (host.to_string(), *count))
            .collect();
        top_hosts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_hosts.truncate(Self::TOP_HOSTS);

        let elapsed = report.elapsed();
        let elapsed_seconds = elapsed
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();

        Self {
            pages_crawled: report.pages_crawled,
            unique_urls: report.frontier.len() as u64,
            duplicate_hits: report.frontier.duplicates(),
            total_edges: report.edges.len() as u64,
            blocked_urls: report.blocked.len() as u64,
            unique_hosts: hosts.len() as u64,
            top_hosts,
            elapsed_seconds,
        }
    }

    /// Pages crawled per second, or zero for an instantaneous run
    pub fn pages_per_second(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.pages_crawled as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages crawled: {}", stats.pages_crawled);
    println!("  Unique URLs seen: {}", stats.unique_urls);
    println!("  Duplicate hits: {}", stats.duplicate_hits);
    println!("  Links reported: {}", stats.total_edges);
    println!("  Blocked by robots.txt: {}", stats.blocked_urls);
    println!();

    if !stats.top_hosts.is_empty() {
        println!("Top Hosts ({} total):", stats.unique_hosts);
        for (host, count) in &stats.top_hosts {
            let percentage = if stats.total_edges > 0 {
                (*count as f64 / stats.total_edges as f64) * 100.0
            } else {
                0.0
            };
            println!("  - {}: {} ({:.1}%)", host, count, percentage);
        }
        println!();
    }

    println!(
        "Elapsed: {:.2}s ({:.2} pages/sec)",
        stats.elapsed_seconds,
        stats.pages_per_second()
    );
}
