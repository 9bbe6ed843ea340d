//! Export sink traits and types
//!
//! This module defines the trait interface for export sinks, the error type
//! they share, and the selection of a sink from an output path.

use super::rows::ArticleRow;
use super::{DelimitedSink, SpreadsheetSink};
use crate::config::ExportConfig;
use crate::ConfigError;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an export file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Trait for export sinks
///
/// Every sink consumes the same rows; sinks differ in their writer and in the
/// stop symbols that must be removed from free text before writing.
pub trait ExportSink {
    /// Symbols replaced by a space in `title` and `text`
    fn stop_symbols(&self) -> Vec<String>;

    /// Writes a header row followed by `rows` to `path`
    ///
    /// # Arguments
    ///
    /// * `rows` - Records in output order
    /// * `path` - Destination file, created or truncated
    fn write_rows(&self, rows: &[ArticleRow], path: &Path) -> ExportResult<()>;
}

/// Output file formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `.csv`
    Delimited,

    /// `.xlsx`
    Spreadsheet,
}

impl OutputFormat {
    /// Picks the format for an output path
    ///
    /// Extensions are matched case-insensitively; anything other than `.csv`
    /// or `.xlsx` is a configuration error.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(Self::Delimited),
            Some("xlsx") => Ok(Self::Spreadsheet),
            Some(other) => Err(ConfigError::UnsupportedExtension(format!(".{}", other))),
            None => Err(ConfigError::UnsupportedExtension(
                path.display().to_string(),
            )),
        }
    }

    /// Builds the sink for this format
    pub fn sink(&self, config: &ExportConfig) -> Result<Box<dyn ExportSink>, ConfigError> {
        match self {
            Self::Delimited => {
                let delimiter = crate::config::validate_delimiter(&config.delimiter)?;
                Ok(Box::new(DelimitedSink::new(delimiter)))
            }
            Self::Spreadsheet => Ok(Box::new(SpreadsheetSink::new())),
        }
    }
}
