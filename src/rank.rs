//! Top-K word ranking
//!
//! Reduces the raw word-count map to its K highest-ranked entries under a
//! fixed three-level comparator. Pure and side-effect-free; the output
//! order is fully determined, with no arbitrary ties.

use crate::output::WordCount;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Ranks word counts and keeps the top `k` entries
///
/// Ordering:
/// 1. higher count first;
/// 2. ties broken by longer word (character length) first;
/// 3. remaining ties broken by ascending lexicographic order.
///
/// The output holds `min(k, distinct words)` entries. An empty map yields
/// an empty list.
pub fn rank(counts: &HashMap<String, u64>, k: usize) -> Vec<WordCount> {
    if counts.is_empty() {
        return Vec::new();
    }

    let mut entries: Vec<WordCount> = counts
        .iter()
        .map(|(word, count)| WordCount {
            word: word.clone(),
            count: *count,
        })
        .collect();

    entries.sort_unstable_by(compare);
    entries.truncate(k);
    entries
}

/// The ranking comparator
fn compare(a: &WordCount, b: &WordCount) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| b.word.chars().count().cmp(&a.word.chars().count()))
        .then_with(|| a.word.cmp(&b.word))
}
