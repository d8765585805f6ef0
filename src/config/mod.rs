//! Configuration loading and validation
//!
//! Configuration is read from a TOML file with kebab-case keys. Loading
//! always validates; an invalid configuration is a fatal error surfaced
//! before any crawl task is scheduled.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlConfig, OutputConfig};
pub use validation::validate;
