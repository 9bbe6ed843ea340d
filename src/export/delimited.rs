//! Delimited-text export

use super::rows::{ArticleRow, HEADERS};
use super::traits::{ExportResult, ExportSink};
use csv::WriterBuilder;
use std::path::Path;

/// Writes rows as delimited text
///
/// Fields are quoted only when they contain the delimiter, a quote or a line
/// break; the delimiter itself is already removed from title and text.
#[derive(Debug, Clone)]
pub struct DelimitedSink {
    delimiter: u8,
}

impl DelimitedSink {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for DelimitedSink {
    fn default() -> Self {
        Self::new(b';')
    }
}

impl ExportSink for DelimitedSink {
    fn stop_symbols(&self) -> Vec<String> {
        vec![char::from(self.delimiter).to_string()]
    }

    fn write_rows(&self, rows: &[ArticleRow], path: &Path) -> ExportResult<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_path(path)?;

        writer.write_record(HEADERS)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        tracing::debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}
