//! Recursive crawl task
//!
//! A task is one unit of work: "visit this URL at this remaining depth,
//! before this deadline". It decomposes into one child task per outbound
//! link and does not complete until every child has (structured concurrency;
//! nothing is left detached). Tasks run on tokio's work-stealing runtime;
//! the semaphore in the shared context caps how many page fetches are in
//! flight at once.

use crate::crawler::state::CrawlState;
use crate::filter::PatternSet;
use crate::parser::PageParser;
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Read-only context shared by every task in one crawl invocation
pub(crate) struct TaskContext {
    pub parser: Arc<dyn PageParser>,
    pub state: Arc<CrawlState>,
    pub ignored_urls: Arc<PatternSet>,
    pub fetch_permits: Arc<Semaphore>,
    pub deadline: Instant,
}

/// Processes one URL and, recursively, everything reachable below it
///
/// The task no-ops when the URL is ignored, the depth budget is exhausted,
/// the deadline has passed, or another task already claimed the URL. A
/// parser failure is contained here: the subtree contributes nothing and no
/// sibling or ancestor is affected.
pub(crate) fn process(
    ctx: Arc<TaskContext>,
    url: String,
    remaining_depth: u32,
) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        if ctx.ignored_urls.matches(&url) {
            tracing::debug!("Skipping ignored URL: {}", url);
            return;
        }

        if remaining_depth == 0 || Instant::now() >= ctx.deadline {
            return;
        }

        // Single atomic check-and-claim: a URL is fetched and counted at
        // most once even when two tasks race on it.
        if !ctx.state.claim(&url) {
            tracing::trace!("URL already claimed: {}", url);
            return;
        }

        let contribution = {
            // Permit held only across the fetch so joining parents never
            // starve the pool.
            let _permit = match ctx.fetch_permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };

            match ctx.parser.parse(&url).await {
                Ok(contribution) => contribution,
                Err(e) => {
                    // A failed page is a no-op for its subtree: no partial
                    // counts, no descent.
                    tracing::warn!("Failed to fetch {}: {}", url, e);
                    return;
                }
            }
        };

        ctx.state.merge(&contribution.word_counts);

        let mut children = JoinSet::new();
        for link in contribution.links {
            children.spawn(process(ctx.clone(), link, remaining_depth - 1));
        }

        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Child crawl task failed: {}", e);
            }
        }
    })
}
