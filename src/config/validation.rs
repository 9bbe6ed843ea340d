use crate::config::types::{BrowserConfig, Config, ExportConfig, SiteOverrides};
use crate::site::Source;
use crate::ConfigError;
use std::path::Path;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_browser_config(&config.browser)?;
    validate_export_config(&config.export)?;
    for (name, overrides) in &config.sites {
        validate_site_overrides(name, overrides)?;
    }
    Ok(())
}

/// Validates browser configuration
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if config.window_width == 0 || config.window_height == 0 {
        return Err(ConfigError::Validation(format!(
            "window size must be positive, got {}x{}",
            config.window_width, config.window_height
        )));
    }

    if config.page_load_timeout < 1000 {
        return Err(ConfigError::Validation(format!(
            "page_load_timeout must be >= 1000ms, got {}ms",
            config.page_load_timeout
        )));
    }

    if let Some(executable) = &config.chrome_executable {
        if executable.is_empty() {
            return Err(ConfigError::Validation(
                "chrome_executable cannot be empty".to_string(),
            ));
        }
        if !Path::new(executable).exists() {
            tracing::warn!("chrome_executable {} does not exist", executable);
        }
    }

    Ok(())
}

/// Validates export configuration
fn validate_export_config(config: &ExportConfig) -> Result<(), ConfigError> {
    if config.list_separator.is_empty() {
        return Err(ConfigError::Validation(
            "list_separator cannot be empty".to_string(),
        ));
    }

    validate_delimiter(&config.delimiter)?;

    Ok(())
}

/// Validates the delimited-text field delimiter
///
/// The delimiter must be a single ASCII character that cannot be confused
/// with quoting or record separation.
pub(crate) fn validate_delimiter(delimiter: &str) -> Result<u8, ConfigError> {
    let bytes = delimiter.as_bytes();
    if bytes.len() != 1 || !bytes[0].is_ascii() {
        return Err(ConfigError::Validation(format!(
            "delimiter must be a single ASCII character, got '{}'",
            delimiter
        )));
    }

    let byte = bytes[0];
    if matches!(byte, b'"' | b'\n' | b'\r') {
        return Err(ConfigError::Validation(format!(
            "delimiter cannot be a quote or line break, got {:?}",
            delimiter
        )));
    }

    Ok(byte)
}

/// Validates overrides for a single source
fn validate_site_overrides(name: &str, overrides: &SiteOverrides) -> Result<(), ConfigError> {
    let source: Source = name.parse().map_err(|_| {
        ConfigError::Validation(format!(
            "unknown site '{}', expected one of: {}",
            name,
            Source::all()
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    if overrides.list_item_count == Some(0) {
        return Err(ConfigError::Validation(format!(
            "sites.{}: list_item_count must be >= 1",
            name
        )));
    }

    if overrides.detail_sleep_every == Some(0) {
        return Err(ConfigError::Validation(format!(
            "sites.{}: detail_sleep_every must be >= 1",
            name
        )));
    }

    if let Some(categories) = &overrides.categories {
        if !source.has_categories() {
            return Err(ConfigError::Validation(format!(
                "sites.{}: source does not support categories",
                name
            )));
        }
        validate_categories(categories)?;
    }

    Ok(())
}

/// Validates category identifiers for multi-category sources
pub(crate) fn validate_categories(categories: &[String]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "categories cannot be empty".to_string(),
        ));
    }

    for category in categories {
        if category.is_empty()
            || !category
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ConfigError::Validation(format!(
                "category '{}' must contain only lowercase letters, digits and hyphens",
                category
            )));
        }
    }

    Ok(())
}
