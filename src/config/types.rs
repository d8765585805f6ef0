use serde::Deserialize;

/// Main configuration structure for TallyWeb
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URLs the crawl starts from
    #[serde(rename = "seed-urls")]
    pub seed_urls: Vec<String>,

    /// Wall-clock budget for the whole crawl, in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Maximum link depth to descend from a seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Number of top-ranked words to include in the result
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,

    /// Number of pages fetched in parallel (0 = one per available core)
    #[serde(default)]
    pub parallelism: usize,

    /// Regex patterns for URLs to skip entirely (full-string match)
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Regex patterns for words to exclude from counting (full-string match)
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path for the JSON crawl result (empty = stdout)
    #[serde(rename = "result-path", default)]
    pub result_path: String,

    /// Path for the profiling report (empty = stdout)
    #[serde(rename = "profile-path", default)]
    pub profile_path: String,
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
