use std::path::Path;

use crate::domain::entities::raw_table::RawTable;
use crate::domain::error::DataLoadError;

/// Reads one sheet of a source file into header + data rows.
pub trait TableSource: Send + Sync {
    fn read_table(&self, path: &Path) -> Result<RawTable, DataLoadError>;
}
