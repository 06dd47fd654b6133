use std::path::Path;

use tracing::debug;

use crate::domain::entities::raw_table::{Cell, RawTable};
use crate::domain::error::DataLoadError;
use crate::usecase::ports::source::TableSource;

/// CSV export of the billing sheet, banner rows included.
///
/// Blank lines count as rows, the same as empty rows in a workbook sheet.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub skip_rows: usize,
    pub delimiter: u8,
}

impl Default for CsvSource {
    fn default() -> Self {
        Self {
            skip_rows: 2,
            delimiter: b',',
        }
    }
}

impl TableSource for CsvSource {
    fn read_table(&self, path: &Path) -> Result<RawTable, DataLoadError> {
        let csv_error = |source| DataLoadError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(path)
            .map_err(csv_error)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            // the reader drops blank lines; put them back so row numbers match the file
            if let Some(position) = record.position() {
                let line = position.line() as usize;
                while rows.len() + 1 < line {
                    rows.push(Vec::new());
                }
            }
            rows.push(
                record
                    .iter()
                    .map(|value| {
                        if value.is_empty() {
                            Cell::Empty
                        } else {
                            Cell::Text(value.to_string())
                        }
                    })
                    .collect::<Vec<_>>(),
            );
        }

        debug!(rows = rows.len(), path = %path.display(), "read csv source");
        RawTable::from_sheet_rows(rows, self.skip_rows)
    }
}
