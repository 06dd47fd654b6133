use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a source file into a normalized dataset. No partial table is
/// produced when any of these occur.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("required column `{column}` not found in sheet header")]
    MissingColumn { column: String },

    #[error("row {row}: cannot parse issue date from {value:?}")]
    InvalidDate { row: usize, value: String },

    #[error("sheet has no header row after skipping {skipped} banner rows")]
    EmptySheet { skipped: usize },

    #[error("failed to open workbook: {}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read sheet `{sheet}` from {}", path.display())]
    Sheet {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read csv: {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to stat source: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
