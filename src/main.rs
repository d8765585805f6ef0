//! TallyWeb main entry point
//!
//! This is the command-line interface for the TallyWeb word-frequency
//! crawler.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tallyweb::config::{load_config, Config};
use tallyweb::crawler::{CrawlEngine, Crawler};
use tallyweb::filter::PatternSet;
use tallyweb::output::write_result_to_path;
use tallyweb::parser::HttpPageParser;
use tallyweb::profiler::{ProfiledCrawler, Profiler};
use tracing_subscriber::EnvFilter;

/// TallyWeb: a parallel word-frequency web crawler
///
/// TallyWeb crawls the link graph reachable from a set of seed URLs, counts
/// word frequencies across every visited page, and reports the top-K words
/// together with the number of distinct URLs visited.
#[derive(Parser, Debug)]
#[command(name = "tallyweb")]
#[command(version)]
#[command(about = "A parallel word-frequency web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tallyweb=info,warn"),
            1 => EnvFilter::new("tallyweb=debug,info"),
            2 => EnvFilter::new("tallyweb=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== TallyWeb Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Timeout: {}s", config.crawl.timeout_seconds);
    println!("  Max depth: {}", config.crawl.max_depth);
    println!("  Popular word count: {}", config.crawl.popular_word_count);
    println!("  Parallelism: {}", config.crawl.parallelism);
    println!("  User agent: {}", config.crawl.user_agent);

    println!("\nSeed URLs ({}):", config.crawl.seed_urls.len());
    for seed in &config.crawl.seed_urls {
        println!("  - {}", seed);
    }

    println!("\nIgnored URL patterns ({}):", config.crawl.ignored_urls.len());
    for pattern in &config.crawl.ignored_urls {
        println!("  - {}", pattern);
    }

    println!(
        "\nIgnored word patterns ({}):",
        config.crawl.ignored_words.len()
    );
    for pattern in &config.crawl.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\nOutput:");
    println!(
        "  Result: {}",
        display_path(&config.output.result_path)
    );
    println!(
        "  Profile: {}",
        display_path(&config.output.profile_path)
    );

    println!("\n✓ Configuration is valid");
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<stdout>"
    } else {
        path
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl: {} seeds, max depth {}, {}s budget",
        config.crawl.seed_urls.len(),
        config.crawl.max_depth,
        config.crawl.timeout_seconds
    );

    let ignored_words = PatternSet::new(&config.crawl.ignored_words)?;
    let page_parser = Arc::new(HttpPageParser::new(&config.crawl.user_agent, ignored_words)?);

    let engine = CrawlEngine::new(&config.crawl, page_parser)?;
    tracing::info!("Effective parallelism: {}", engine.parallelism());

    let profiler = Arc::new(Profiler::new());
    let crawler = ProfiledCrawler::new(engine, profiler.clone());

    let result = crawler.crawl(&config.crawl.seed_urls).await?;

    tracing::info!(
        "Crawl finished: {} URLs visited, {} ranked words",
        result.urls_visited,
        result.word_counts.len()
    );

    write_result_to_path(&result, &config.output.result_path)?;
    profiler.write_report_to_path(&config.output.profile_path)?;

    Ok(())
}
