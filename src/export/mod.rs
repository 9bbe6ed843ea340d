//! Export module for writing crawl results to tabular files
//!
//! This module handles:
//! - Shaping articles into flat rows (date layout, list joining, stop symbols)
//! - Writing delimited text with the csv crate
//! - Writing spreadsheets with rust_xlsxwriter

mod delimited;
mod rows;
mod spreadsheet;
mod traits;

pub use delimited::DelimitedSink;
pub use rows::{replace_stop_symbols, to_rows, ArticleRow, DateLayout, RowOptions, HEADERS};
pub use spreadsheet::SpreadsheetSink;
pub use traits::{ExportError, ExportResult, ExportSink, OutputFormat};

use crate::config::ExportConfig;
use crate::model::CrawlResult;
use crate::HarvestError;
use std::path::Path;

/// Writes a crawl result to `path` in the format its extension names
///
/// # Arguments
///
/// * `result` - The articles to export
/// * `path` - Output file; `.csv` or `.xlsx`
/// * `config` - Date layout, list separator and delimiter
///
/// # Returns
///
/// * `Ok(usize)` - Number of rows written
/// * `Err(HarvestError)` - Unsupported extension or write failure
pub fn export_result(
    result: &CrawlResult,
    path: &Path,
    config: &ExportConfig,
) -> Result<usize, HarvestError> {
    let sink = OutputFormat::from_path(path)?.sink(config)?;

    let options = RowOptions {
        date_layout: config.date_format,
        list_separator: config.list_separator.clone(),
        stop_symbols: sink.stop_symbols(),
    };
    let rows = to_rows(result, &options);
    sink.write_rows(&rows, path)?;

    tracing::info!("Exported {} articles to {}", rows.len(), path.display());
    Ok(rows.len())
}
