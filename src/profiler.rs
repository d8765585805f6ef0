//! Call profiling
//!
//! [`Profiler`] accumulates wall-clock timing per call signature.
//! [`ProfiledCrawler`] is a transparent decorator over any [`Crawler`]: it
//! starts a timer before delegating and records the elapsed time after,
//! without changing the delegate's observable behavior or return values.

use crate::crawler::Crawler;
use crate::output::CrawlResult;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Accumulated timing for one call signature
#[derive(Debug, Clone, Copy, Default)]
pub struct CallStats {
    /// Number of recorded calls
    pub calls: u64,

    /// Total wall-clock time across all calls
    pub total: Duration,
}

/// Accumulates per-signature call timing for one program run
#[derive(Debug)]
pub struct Profiler {
    started_at: DateTime<Local>,
    stats: Mutex<HashMap<String, CallStats>>,
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            stats: Mutex::new(HashMap::new()),
        }
    }

    /// Records one timed call under the given signature
    pub fn record(&self, signature: &str, elapsed: Duration) {
        let mut stats = self.stats.lock().expect("profiler lock poisoned");
        let entry = stats.entry(signature.to_string()).or_default();
        entry.calls += 1;
        entry.total += elapsed;
    }

    /// Returns the accumulated stats for a signature, if any call was recorded
    pub fn stats_for(&self, signature: &str) -> Option<CallStats> {
        let stats = self.stats.lock().expect("profiler lock poisoned");
        stats.get(signature).copied()
    }

    /// Writes the accumulated timing report to the given sink
    pub fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;

        let stats = self.stats.lock().expect("profiler lock poisoned");
        let mut signatures: Vec<&String> = stats.keys().collect();
        signatures.sort();

        for signature in signatures {
            let entry = &stats[signature];
            writeln!(
                writer,
                "  {} called {} time(s), total {:?}",
                signature, entry.calls, entry.total
            )?;
        }

        writer.flush()
    }

    /// Appends the timing report to a file, or prints it when the path is empty
    pub fn write_report_to_path(&self, path: &str) -> io::Result<()> {
        if path.is_empty() {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            self.write_report(&mut handle)
        } else {
            // Later runs append to the same report file
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(Path::new(path))?;
            let mut writer = BufWriter::new(file);
            self.write_report(&mut writer)
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Crawler`] decorator that times every `crawl` call
pub struct ProfiledCrawler<C> {
    inner: C,
    profiler: Arc<Profiler>,
    signature: String,
}

impl<C: Crawler> ProfiledCrawler<C> {
    pub fn new(inner: C, profiler: Arc<Profiler>) -> Self {
        let signature = format!("{}::crawl", std::any::type_name::<C>());
        Self {
            inner,
            profiler,
            signature,
        }
    }
}

#[async_trait]
impl<C: Crawler> Crawler for ProfiledCrawler<C> {
    async fn crawl(&self, seed_urls: &[String]) -> crate::Result<CrawlResult> {
        let start = Instant::now();
        let result = self.inner.crawl(seed_urls).await;
        self.profiler.record(&self.signature, start.elapsed());
        result
    }
}
