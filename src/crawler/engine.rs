//! Crawl engine - orchestrates one top-level crawl
//!
//! The engine computes the deadline, creates fresh shared state, launches
//! one root task per seed URL, waits for the whole task forest to complete,
//! and reduces the final count map to the ranked result.

use crate::config::CrawlConfig;
use crate::crawler::state::CrawlState;
use crate::crawler::task::{process, TaskContext};
use crate::crawler::Crawler;
use crate::filter::PatternSet;
use crate::output::CrawlResult;
use crate::parser::PageParser;
use crate::rank::rank;
use async_trait::async_trait;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Orchestrates parallel crawls over a link graph
pub struct CrawlEngine {
    parser: Arc<dyn PageParser>,
    ignored_urls: Arc<PatternSet>,
    timeout: Duration,
    max_depth: u32,
    popular_word_count: usize,
    parallelism: usize,
}

impl CrawlEngine {
    /// Creates an engine from a crawl configuration and a page parser
    pub fn new(config: &CrawlConfig, parser: Arc<dyn PageParser>) -> crate::Result<Self> {
        let ignored_urls = Arc::new(PatternSet::new(&config.ignored_urls)?);

        Ok(Self {
            parser,
            ignored_urls,
            timeout: Duration::from_secs(config.timeout_seconds),
            max_depth: config.max_depth,
            popular_word_count: config.popular_word_count,
            parallelism: effective_parallelism(config.parallelism),
        })
    }

    /// Number of pages this engine fetches in parallel
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }
}

#[async_trait]
impl Crawler for CrawlEngine {
    async fn crawl(&self, seed_urls: &[String]) -> crate::Result<CrawlResult> {
        // The deadline is computed once; every task checks it at entry.
        let deadline = Instant::now() + self.timeout;

        // Fresh state per call: nothing leaks between crawls.
        let state = Arc::new(CrawlState::new());

        let ctx = Arc::new(TaskContext {
            parser: self.parser.clone(),
            state: state.clone(),
            ignored_urls: self.ignored_urls.clone(),
            fetch_permits: Arc::new(Semaphore::new(self.parallelism)),
            deadline,
        });

        // One root task per seed; all roots share the same state.
        let mut roots = JoinSet::new();
        for seed in seed_urls {
            roots.spawn(process(ctx.clone(), seed.clone(), self.max_depth));
        }

        // Block until every root, and transitively every child, has joined.
        while let Some(joined) = roots.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Root crawl task failed: {}", e);
            }
        }

        let counts = state.snapshot_counts();
        let urls_visited = state.visited_count();

        tracing::info!(
            "Crawl complete: {} URLs visited, {} distinct words",
            urls_visited,
            counts.len()
        );

        if counts.is_empty() {
            return Ok(CrawlResult {
                word_counts: Vec::new(),
                urls_visited,
            });
        }

        Ok(CrawlResult {
            word_counts: rank(&counts, self.popular_word_count),
            urls_visited,
        })
    }
}

/// Caps the configured parallelism at the available hardware parallelism
///
/// A configured value of 0 means "one fetch per available core".
fn effective_parallelism(requested: usize) -> usize {
    let available = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);

    if requested == 0 {
        available
    } else {
        requested.min(available)
    }
}
