//! Spreadsheet export

use super::rows::{ArticleRow, HEADERS};
use super::traits::{ExportResult, ExportSink};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Longest text a spreadsheet cell can hold
const MAX_CELL_CHARS: usize = 32_767;

/// Writes rows to a single-sheet `.xlsx` workbook
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetSink;

impl SpreadsheetSink {
    pub fn new() -> Self {
        Self
    }
}

impl ExportSink for SpreadsheetSink {
    fn stop_symbols(&self) -> Vec<String> {
        Vec::new()
    }

    fn write_rows(&self, rows: &[ArticleRow], path: &Path) -> ExportResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold();

        for (col, header) in (0u16..).zip(HEADERS) {
            worksheet.write_string_with_format(0, col, header, &header_format)?;
        }

        for (row_index, row) in (1u32..).zip(rows) {
            worksheet.write_number(row_index, 0, row.id as f64)?;
            let cells = [
                &row.date,
                &row.link,
                &row.title,
                &row.text,
                &row.tags,
                &row.metadata,
            ];
            for (col, value) in (1u16..).zip(cells) {
                worksheet.write_string(row_index, col, fit_cell(value))?;
            }
        }

        workbook.save(path)?;

        tracing::debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}

fn fit_cell(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_CHARS {
        return value.to_string();
    }
    tracing::warn!("Truncating cell text of {} chars", value.chars().count());
    value.chars().take(MAX_CELL_CHARS).collect()
}
