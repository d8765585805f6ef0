//! Shared crawl state
//!
//! One [`CrawlState`] is created per crawl invocation and shared across the
//! entire task tree. It is the only mutable state tasks share, and both of
//! its halves are concurrency-safe on their own:
//!
//! - the visited set supports an atomic add-if-absent claim, so a URL is
//!   fetched and counted by exactly one task no matter how many discover it;
//! - the count map supports an atomic per-word merge-or-insert, so no update
//!   is lost under concurrent merges from sibling tasks.

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

/// Visited-URL set and word-count accumulator for one crawl invocation
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: DashSet<String>,
    counts: DashMap<String, u64>,
}

impl CrawlState {
    /// Creates empty state for a fresh crawl
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a URL for visitation
    ///
    /// Returns true for exactly one caller per URL; every later (or racing)
    /// caller gets false and must not fetch or count the URL.
    pub fn claim(&self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Merges a page's word-count contribution into the shared map
    ///
    /// Each word's delta is added atomically, defaulting to 0 when the word
    /// is not yet present.
    pub fn merge(&self, contribution: &HashMap<String, u64>) {
        for (word, delta) in contribution {
            *self.counts.entry(word.clone()).or_insert(0) += delta;
        }
    }

    /// Number of distinct URLs claimed so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Copies the accumulated counts out
    ///
    /// Only meaningful once every task in the crawl has joined.
    pub fn snapshot_counts(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
