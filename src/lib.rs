//! site-tree: a breadth-first link crawler
//!
//! This crate crawls outward from a seed URL, mapping `parent -> child` link edges.
//! It can stay inside the seed's registrable domain, honours robots.txt when asked,
//! and stops on its own once no unvisited URL is left.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for site-tree operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Robots.txt error for {url}: {message}")]
    Robots { url: String, message: String },

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Cannot resolve '{0}' without a host to resolve it against")]
    Unresolvable(String),

    #[error("Public suffix list error: {0}")]
    SuffixList(String),
}

/// Result type alias for site-tree operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{crawl, Coordinator, CrawlReport};
pub use crate::url::{Resolution, Url};
