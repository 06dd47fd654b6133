use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::domain::entities::raw_table::{Cell, RawTable};
use crate::domain::error::DataLoadError;
use crate::usecase::ports::source::TableSource;

pub fn cell_from_data(cell: &Data) -> Cell {
    match cell {
        Data::String(v) => Cell::Text(v.to_string()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(v) => Cell::Bool(*v),
        Data::DateTime(v) => Cell::DateTime(v.as_f64()),
        Data::DateTimeIso(v) => Cell::Text(v.to_string()),
        Data::DurationIso(v) => Cell::Text(v.to_string()),
        Data::Error(v) => Cell::Error(format!("{v:?}")),
        Data::Empty => Cell::Empty,
    }
}

/// Rows of `range` as they sit on the sheet: calamine trims leading empty rows, so
/// they are restored here to keep banner offsets stable.
pub fn range_to_rows(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let leading = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); leading];
    rows.extend(
        range
            .rows()
            .map(|r| r.iter().map(cell_from_data).collect::<Vec<_>>()),
    );
    rows
}

/// Workbook sheet reader (xlsx, xlsm, xls, ods).
#[derive(Debug, Clone)]
pub struct XlsxSource {
    pub sheet: String,
    pub skip_rows: usize,
}

impl TableSource for XlsxSource {
    fn read_table(&self, path: &Path) -> Result<RawTable, DataLoadError> {
        let mut workbook = open_workbook_auto(path).map_err(|source| DataLoadError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;
        let range = workbook
            .worksheet_range(&self.sheet)
            .map_err(|source| DataLoadError::Sheet {
                path: path.to_path_buf(),
                sheet: self.sheet.clone(),
                source,
            })?;

        let rows = range_to_rows(&range);
        debug!(sheet = %self.sheet, rows = rows.len(), "read workbook sheet");
        RawTable::from_sheet_rows(rows, self.skip_rows)
    }
}
