//! Configuration module for site-tree
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and layering command-line overrides on top of it.
//!
//! # Example
//!
//! ```no_run
//! use site_tree::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-tree.toml")).unwrap();
//! println!("Robots mode: {}", config.crawler.robots);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_worker_count, Config, CrawlerConfig, Overrides, DEFAULT_USER_AGENT, MAX_WORKERS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
