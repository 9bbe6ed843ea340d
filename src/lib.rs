//! news-harvest: incremental news crawler
//!
//! This crate drives a headless browsing session through the paginated news feeds of
//! several sites until a requested number of articles is collected, enriches every
//! article from its detail page, and exports the results as delimited text or a
//! spreadsheet.

pub mod config;
pub mod crawler;
pub mod export;
pub mod model;
pub mod pagination;
pub mod session;
pub mod site;

use thiserror::Error;

/// Main error type for news-harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browsing session error: {0}")]
    Session(#[from] session::SessionError),

    #[error("Failed to open entry point {url}: {source}")]
    EntryPoint {
        url: String,
        source: session::SessionError,
    },

    #[error("Export error: {0}")]
    Export(#[from] export::ExportError),

    #[error("Invalid crawl phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: crawler::CrawlPhase,
        to: crawler::CrawlPhase,
    },

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

    #[error("Unsupported output extension '{0}', please use .csv or .xlsx")]
    UnsupportedExtension(String),
}

/// Result type alias for news-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl_source, Coordinator, CrawlPhase};
pub use model::{Article, CrawlResult};
pub use site::Source;
