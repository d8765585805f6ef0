//! Crawl orchestration
//!
//! This module contains the concurrent crawl core:
//! - the [`Crawler`] contract implemented by the engine (and decorated by
//!   the profiler)
//! - the engine that runs one crawl invocation end to end
//! - the recursive task that visits a URL and fans out over its links
//! - the shared visited-set / count-map state

mod engine;
mod state;
mod task;

pub use engine::CrawlEngine;
pub use state::CrawlState;

use crate::output::CrawlResult;
use async_trait::async_trait;

/// The crawl-engine contract
///
/// Anything implementing this can run a crawl from seed URLs to a ranked
/// result. The profiling wrapper decorates this seam without the engine
/// being aware of it.
#[async_trait]
pub trait Crawler: Send + Sync {
    /// Crawls the link graph reachable from the seed URLs
    async fn crawl(&self, seed_urls: &[String]) -> crate::Result<CrawlResult>;
}
