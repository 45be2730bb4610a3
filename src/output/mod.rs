//! Output module for end-of-run summaries
//!
//! The crawl itself reports edges through the log as they are found. This module
//! prints what is left to say once the run is over.

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics};

use crate::crawler::CrawlReport;

/// Prints a summary of a finished run to stdout
///
/// # Arguments
///
/// * `report` - The report returned by the crawl
pub fn print_summary(report: &CrawlReport) {
    println!("Seed: {}", report.seed);
    println!(
        "Started: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "Finished: {}\n",
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    print_statistics(&CrawlStatistics::from_report(report));
}
