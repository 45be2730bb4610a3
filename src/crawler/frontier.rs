//! Registry of URLs already scheduled during a run

use std::collections::HashMap;

/// Outcome of recording a URL in the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First time this URL was seen
    New,
    /// The URL was recorded before
    Seen,
}

/// Occurrence counts keyed by resolved URL string
///
/// Keys are compared as exact strings: `http://a.com/x` and `http://a.com/x/` are
/// different entries. The coordinator is the only owner, so no locking is needed.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    visits: HashMap<String, u32>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `url` and reports whether it was new
    pub fn mark_and_check(&mut self, url: &str) -> Visit {
        match self.visits.get_mut(url) {
            Some(count) => {
                *count = count.saturating_add(1);
                Visit::Seen
            }
            None => {
                self.visits.insert(url.to_string(), 1);
                Visit::New
            }
        }
    }

    /// How many times `url` has been recorded
    pub fn count(&self, url: &str) -> u32 {
        self.visits.get(url).copied().unwrap_or(0)
    }

    /// Number of distinct URLs recorded
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Total repeat occurrences across all URLs
    pub fn duplicates(&self) -> u64 {
        self.visits.values().map(|&c| u64::from(c) - 1).sum()
    }

    /// Iterates over `(url, count)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.visits.iter().map(|(url, &count)| (url.as_str(), count))
    }
}
