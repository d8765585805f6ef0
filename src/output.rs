//! Crawl result and JSON result writer
//!
//! The result is an immutable value produced once at the end of a crawl:
//! the ranked word counts plus the number of distinct URLs visited. It is
//! serialized as JSON, either to a file or to stdout when no path is
//! configured.

use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One ranked (word, count) entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// The output of one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlResult {
    /// Ranked word counts (empty when no page contributed any words)
    #[serde(rename = "wordCounts")]
    pub word_counts: Vec<WordCount>,

    /// Number of distinct URLs visited
    #[serde(rename = "urlsVisited")]
    pub urls_visited: usize,
}

/// Writes the crawl result as pretty-printed JSON to the given sink
pub fn write_result<W: Write>(result: &CrawlResult, writer: &mut W) -> crate::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes the crawl result to a file, or to stdout when the path is empty
pub fn write_result_to_path(result: &CrawlResult, path: &str) -> crate::Result<()> {
    if path.is_empty() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_result(result, &mut handle)
    } else {
        let file = File::create(Path::new(path))?;
        let mut writer = BufWriter::new(file);
        write_result(result, &mut writer)
    }
}
