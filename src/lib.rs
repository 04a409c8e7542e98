//! Philosophy Crawler: follows the first link until it reaches Philosophy
//!
//! This crate starts at an encyclopedia article and repeatedly follows the
//! first eligible in-body link until it reaches the target article, revisits
//! an article it has already seen, or runs out of eligible links.

pub mod config;
pub mod crawler;
pub mod diagnostics;
pub mod output;
pub mod wiki;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error fetching {title}: {source}")]
    Http {
        title: String,
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("Page does not exist: {0}")]
    MissingPage(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
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
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlOptions, CrawlOutcome, CrawlReport, Crawler};
pub use wiki::{ArticleSource, FetchOutcome, RenderedArticle, WikiClient};
