//! Public suffix list handling
//!
//! The ICANN section of the Mozilla Public Suffix List is compiled into the binary. A local
//! list file can be installed once at startup to replace it for the whole process.

use crate::UrlError;
use once_cell::sync::{Lazy, OnceCell};
use publicsuffix::{List, Psl};
use std::path::Path;

const BUNDLED_LIST: &str = include_str!("../../data/public_suffix_list.dat");

static INSTALLED: OnceCell<SuffixList> = OnceCell::new();

static BUNDLED: Lazy<Option<SuffixList>> = Lazy::new(|| match SuffixList::parse(BUNDLED_LIST) {
    Ok(list) => Some(list),
    Err(e) => {
        tracing::error!("Bundled public suffix list is unusable: {}", e);
        None
    }
});

/// A parsed public suffix list
#[derive(Debug)]
pub struct SuffixList {
    list: List,
}

impl SuffixList {
    /// Parses list data in the standard `public_suffix_list.dat` format
    pub fn parse(data: &str) -> Result<Self, UrlError> {
        data.parse::<List>()
            .map(|list| Self { list })
            .map_err(|e| UrlError::SuffixList(e.to_string()))
    }

    /// Reads and parses a list file from disk
    pub fn load(path: &Path) -> Result<Self, UrlError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| UrlError::SuffixList(format!("{}: {}", path.display(), e)))?;
        Self::parse(&data)
    }

    /// Returns the longest public suffix of `host` that the list knows about
    ///
    /// `host` must already be lowercase. Unlisted top-level labels yield `None`
    /// rather than the implicit `*` rule.
    pub fn known_suffix<'a>(&self, host: &'a str) -> Option<&'a str> {
        let suffix = self.list.suffix(host.as_bytes())?;
        if !suffix.is_known() {
            return None;
        }
        let len = suffix.as_bytes().len();
        host.get(host.len().checked_sub(len)?..)
    }
}

/// Installs `list` as the process-wide suffix list
///
/// Returns `false` if a list was already installed; the first one stays active.
pub fn install_suffix_list(list: SuffixList) -> bool {
    INSTALLED.set(list).is_ok()
}

/// Loads a list file and installs it as the process-wide suffix list
pub fn install_suffix_list_from(path: &Path) -> Result<(), UrlError> {
    let list = SuffixList::load(path)?;
    if !install_suffix_list(list) {
        tracing::warn!(
            "Public suffix list already installed, ignoring {}",
            path.display()
        );
    } else {
        tracing::info!("Using public suffix list from {}", path.display());
    }
    Ok(())
}

/// The installed list, falling back to the bundled snapshot
pub fn active_suffix_list() -> Option<&'static SuffixList> {
    INSTALLED.get().or_else(|| BUNDLED.as_ref())
}
