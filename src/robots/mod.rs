//! Robots.txt handling module
//!
//! This module fetches and parses the seed host's robots.txt and answers the two
//! questions the crawler asks of it: may this URL be fetched, and how long to wait
//! between dispatches.

mod parser;
mod policy;

pub use parser::RobotsRules;
pub use policy::{robots_url, RobotsPolicy};
