use crate::config::types::{Config, CrawlConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.seed_urls.is_empty() {
        return Err(ConfigError::Validation(
            "seed-urls must contain at least one URL".to_string(),
        ));
    }

    for seed in &config.seed_urls {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Seed URL '{}' must use an http(s) scheme",
                seed
            )));
        }
    }

    if config.timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-seconds must be >= 1, got {}",
            config.timeout_seconds
        )));
    }

    if config.popular_word_count < 1 {
        return Err(ConfigError::Validation(format!(
            "popular-word-count must be >= 1, got {}",
            config.popular_word_count
        )));
    }

    if config.parallelism > 100 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be between 0 and 100, got {}",
            config.parallelism
        )));
    }

    validate_patterns(&config.ignored_urls, "ignored-urls")?;
    validate_patterns(&config.ignored_words, "ignored-words")?;

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every ignore pattern compiles
fn validate_patterns(patterns: &[String], field: &str) -> Result<(), ConfigError> {
    for pattern in patterns {
        if let Err(e) = regex::Regex::new(pattern) {
            return Err(ConfigError::InvalidPattern(format!(
                "{} entry '{}': {}",
                field, pattern, e
            )));
        }
    }
    Ok(())
}
