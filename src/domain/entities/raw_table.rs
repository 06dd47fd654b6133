use std::fmt;

use crate::domain::error::DataLoadError;

/// A sheet cell as read from the source, before any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Spreadsheet date serial (days since 1899-12-30).
    DateTime(f64),
    Error(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) => f.write_str(text),
            Cell::Number(value) | Cell::DateTime(value) => f.write_str(&format_f64(*value)),
            Cell::Bool(value) => write!(f, "{value}"),
            Cell::Error(err) => write!(f, "#{err}"),
        }
    }
}

/// Header and data rows of one sheet, banner rows already removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// 1-based sheet row number of `rows[0]`.
    pub first_data_row: usize,
}

impl RawTable {
    /// Splits full sheet rows into header and data, skipping `skip_rows` banner rows.
    pub fn from_sheet_rows(
        mut sheet_rows: Vec<Vec<Cell>>,
        skip_rows: usize,
    ) -> Result<Self, DataLoadError> {
        if sheet_rows.len() <= skip_rows {
            return Err(DataLoadError::EmptySheet { skipped: skip_rows });
        }
        let rows = sheet_rows.split_off(skip_rows + 1);
        let headers = sheet_rows
            .pop()
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect();

        Ok(Self {
            headers,
            rows,
            first_data_row: skip_rows + 2,
        })
    }
}

pub(crate) fn format_f64(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}
