//! site-tree main entry point
//!
//! This is the command-line interface for the site-tree link crawler.

use anyhow::Context;
use clap::Parser;
use site_tree::config::{load_config_with_hash, validate, Config, Overrides};
use site_tree::crawler::crawl;
use site_tree::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// site-tree: a breadth-first link crawler
///
/// Starting from a seed URL, site-tree fetches pages, logs every new
/// `parent -> child` link it finds and keeps following them until no
/// unvisited URL is left.
#[derive(Parser, Debug)]
#[command(name = "site-tree")]
#[command(version)]
#[command(about = "A breadth-first link crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Number of parallel workers (defaults to twice the CPU count)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Only follow links on the seed's registrable domain
    #[arg(short, long)]
    limit_to_domain: bool,

    /// Honour the seed host's robots.txt (forces a single worker)
    #[arg(short, long)]
    robots: bool,

    /// Report the seed page's links without following them
    #[arg(short, long)]
    single_depth: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            workers: self.workers,
            limit_to_domain: self.limit_to_domain,
            robots: self.robots,
            single_depth: self.single_depth,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    config.crawler.apply_overrides(&cli.overrides());
    validate(&config).context("invalid configuration")?;

    tracing::debug!(
        "Limit to domain: {}, robots: {}, single depth: {}",
        config.crawler.limit_to_domain,
        config.crawler.robots,
        config.crawler.single_depth
    );

    let report = match crawl(&cli.url, config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e).with_context(|| format!("crawl of {} failed", cli.url));
        }
    };

    if !cli.quiet {
        print_summary(&report);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_tree=info,warn"),
            1 => EnvFilter::new("site_tree=debug,info"),
            2 => EnvFilter::new("site_tree=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
