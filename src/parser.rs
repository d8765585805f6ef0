//! Page parser collaborator
//!
//! The crawler never talks to the network directly; it hands each claimed
//! URL to a [`PageParser`] and gets back that page's word-count contribution
//! and outbound links. [`HttpPageParser`] is the production implementation:
//! it fetches the page over HTTP and parses the HTML with `scraper`.
//!
//! Parsers must be safe to call concurrently for different URLs; no ordering
//! is assumed between calls.

use crate::filter::PatternSet;
use crate::TallyError;
use async_trait::async_trait;
use regex::Regex;
use reqwest::{redirect::Policy, Client};
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Any run of non-alphanumeric characters separates words
const WORD_SPLIT: &str = r"[^\p{L}\p{N}]+";

/// What a single page contributes to the crawl
#[derive(Debug, Clone, Default)]
pub struct PageContribution {
    /// Word frequencies found on this page
    pub word_counts: HashMap<String, u64>,

    /// Outbound links found on this page (absolute URLs, document order)
    pub links: Vec<String>,
}

/// Fetches and parses a single page
#[async_trait]
pub trait PageParser: Send + Sync {
    /// Returns the page's word-count contribution and outbound links
    async fn parse(&self, url: &str) -> crate::Result<PageContribution>;
}

/// HTTP-backed page parser
pub struct HttpPageParser {
    client: Client,
    ignored_words: PatternSet,
    word_boundary: Regex,
}

impl HttpPageParser {
    /// Creates a parser with its own HTTP client
    ///
    /// # Arguments
    ///
    /// * `user_agent` - User agent string sent with every request
    /// * `ignored_words` - Full-string-match patterns for words to exclude
    ///   from counting
    pub fn new(user_agent: &str, ignored_words: PatternSet) -> crate::Result<Self> {
        let client = build_http_client(user_agent)?;

        let word_boundary =
            Regex::new(WORD_SPLIT).map_err(|source| TallyError::InvalidPattern {
                pattern: WORD_SPLIT.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            ignored_words,
            word_boundary,
        })
    }
}

#[async_trait]
impl PageParser for HttpPageParser {
    async fn parse(&self, url: &str) -> crate::Result<PageContribution> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| TallyError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TallyError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(TallyError::ContentMismatch {
                url: url.to_string(),
                content_type,
            });
        }

        // Resolve relative links against the final URL, not the requested one
        let base_url = Url::parse(response.url().as_str())?;

        let body = response
            .text()
            .await
            .map_err(|source| TallyError::Http {
                url: url.to_string(),
                source,
            })?;

        Ok(PageContribution {
            word_counts: count_words(&body, &self.word_boundary, &self.ignored_words),
            links: extract_links(&body, &base_url),
        })
    }
}

/// Builds an HTTP client with proper configuration
fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Counts word frequencies in the visible text of an HTML document
///
/// Text is taken from the `<body>` element (the whole document if there is
/// none), split on any run of non-alphanumeric characters, and lowercased.
/// Words matching an ignored pattern contribute nothing.
pub fn count_words(
    html: &str,
    word_boundary: &Regex,
    ignored_words: &PatternSet,
) -> HashMap<String, u64> {
    let document = Html::parse_document(html);

    let text: String = Selector::parse("body")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|body| body.text().collect::<Vec<_>>().join(" "))
        })
        .unwrap_or_else(|| document.root_element().text().collect::<Vec<_>>().join(" "));

    let mut counts = HashMap::new();
    for token in word_boundary.split(&text) {
        if token.is_empty() {
            continue;
        }
        let word = token.to_lowercase();
        if ignored_words.matches(&word) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}

/// Extracts outbound links from an HTML document, in document order
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
