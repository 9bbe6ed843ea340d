//! Configuration module for news-harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; `Config::default()` is what runs when no file is given.
//!
//! # Example
//!
//! ```no_run
//! use news_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Page load timeout: {}ms", config.browser.page_load_timeout);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserConfig, Config, ExportConfig, SiteOverrides};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
pub(crate) use validation::{validate_categories, validate_delimiter};
