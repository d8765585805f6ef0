//! TallyWeb: a parallel word-frequency web crawler
//!
//! This crate crawls a web link graph from a set of seed URLs, counts word
//! frequencies across every visited page, and reduces the counts to a ranked
//! top-K word list. The traversal is a forest of recursive tasks sharing a
//! concurrency-safe visited set and count map, bounded by a link depth and a
//! wall-clock deadline.

pub mod config;
pub mod crawler;
pub mod filter;
pub mod output;
pub mod parser;
pub mod profiler;
pub mod rank;

use thiserror::Error;

/// Main error type for TallyWeb operations
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Expected HTML for {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern { pattern: String, source: regex::Error },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid ignore pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for TallyWeb operations
pub type Result<T> = std::result::Result<T, TallyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, Crawler};
pub use filter::PatternSet;
pub use output::{CrawlResult, WordCount};
pub use parser::{HttpPageParser, PageContribution, PageParser};
