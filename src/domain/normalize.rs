//! Raw sheet rows to typed [`Record`]s.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::warn;

use crate::domain::entities::dataset::{CoercionReport, Dataset};
use crate::domain::entities::raw_table::{Cell, RawTable};
use crate::domain::entities::record::{Period, Record};
use crate::domain::entities::summary::safe_div;
use crate::domain::error::DataLoadError;

pub mod columns {
    pub const DIVISION: &str = "DIVISAO";
    pub const CLIENT: &str = "CLIENTE";
    pub const MATERIAL: &str = "MATERIAL";
    pub const OPERATION: &str = "OPERACAO";
    pub const EXPORT: &str = "EX";
    pub const ISSUE_DATE: &str = "DATA_EMISSAO_NF";
    pub const REVENUE: &str = "FATURAMENTO";
    pub const PRODUCT_COST: &str = "CUSTO_PRODUTO";
    pub const QUANTITY: &str = "QTDE";
    pub const MARGIN: &str = "MARGEM";
}

/// How `margin_value` is obtained for each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarginPolicy {
    /// `revenue - product_cost`.
    #[default]
    RevenueMinusCost,
    /// The sheet's `MARGEM` column, coerced like any other numeric cell.
    SourceColumn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub margin_policy: MarginPolicy,
    /// Stored in `export_flag` when the `EX` cell is blank.
    pub export_default: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            margin_policy: MarginPolicy::default(),
            export_default: "No".to_string(),
        }
    }
}

static EMPTY: Cell = Cell::Empty;

struct ColumnLayout {
    division: usize,
    client: usize,
    material: usize,
    operation: usize,
    export: usize,
    issue_date: usize,
    revenue: usize,
    product_cost: usize,
    quantity: usize,
    margin: Option<usize>,
}

impl ColumnLayout {
    fn resolve(headers: &[String], policy: MarginPolicy) -> Result<Self, DataLoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| DataLoadError::MissingColumn {
                    column: name.to_string(),
                })
        };

        let margin = match policy {
            MarginPolicy::SourceColumn => Some(find(columns::MARGIN)?),
            MarginPolicy::RevenueMinusCost => None,
        };

        Ok(Self {
            division: find(columns::DIVISION)?,
            client: find(columns::CLIENT)?,
            material: find(columns::MATERIAL)?,
            operation: find(columns::OPERATION)?,
            export: find(columns::EXPORT)?,
            issue_date: find(columns::ISSUE_DATE)?,
            revenue: find(columns::REVENUE)?,
            product_cost: find(columns::PRODUCT_COST)?,
            quantity: find(columns::QUANTITY)?,
            margin,
        })
    }
}

/// Normalizes every non-blank row of `table`.
///
/// Fails on a missing required column or an unreadable issue date. Numeric cells that
/// cannot be read become zero and are counted in the returned [`CoercionReport`].
pub fn normalize(table: &RawTable, options: &NormalizeOptions) -> Result<Dataset, DataLoadError> {
    let layout = ColumnLayout::resolve(&table.headers, options.margin_policy)?;
    let mut coercions = CoercionReport::default();
    let mut records = Vec::with_capacity(table.rows.len());

    for (offset, row) in table.rows.iter().enumerate() {
        if row.iter().all(Cell::is_empty) {
            continue;
        }
        let cell = |idx: usize| row.get(idx).unwrap_or(&EMPTY);

        let date_cell = cell(layout.issue_date);
        let issue_date = parse_date(date_cell).ok_or_else(|| DataLoadError::InvalidDate {
            row: table.first_data_row + offset,
            value: date_cell.to_string(),
        })?;

        let revenue = coerce(cell(layout.revenue), columns::REVENUE, &mut coercions);
        let product_cost =
            coerce(cell(layout.product_cost), columns::PRODUCT_COST, &mut coercions);
        let quantity = coerce(cell(layout.quantity), columns::QUANTITY, &mut coercions);
        let margin_value = match layout.margin {
            Some(idx) => coerce(cell(idx), columns::MARGIN, &mut coercions),
            None => revenue - product_cost,
        };

        let export_flag = match text(cell(layout.export)) {
            flag if flag.is_empty() => options.export_default.clone(),
            flag => flag,
        };
        let period = Period::from_date(issue_date);

        records.push(Record {
            division: text(cell(layout.division)),
            client: text(cell(layout.client)),
            material: text(cell(layout.material)),
            operation_type: text(cell(layout.operation)),
            export_flag,
            issue_date,
            revenue,
            product_cost,
            margin_value,
            margin_percent: safe_div(margin_value, revenue),
            quantity,
            period,
            year: period.year,
        });
    }

    if !coercions.is_empty() {
        warn!(
            coerced = coercions.total(),
            columns = ?coercions.by_column(),
            "numeric cells replaced by zero"
        );
    }

    Ok(Dataset { records, coercions })
}

fn text(cell: &Cell) -> String {
    match cell {
        Cell::Error(_) => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn coerce(cell: &Cell, column: &str, report: &mut CoercionReport) -> f64 {
    match parse_number(cell) {
        Some(value) => value,
        None => {
            report.record(column);
            0.0
        }
    }
}

pub(crate) fn parse_number(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Number(value) => *value,
        Cell::Text(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

const TEXT_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
const TEXT_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub(crate) fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::DateTime(serial) | Cell::Number(serial) => date_from_serial(*serial),
        Cell::Text(text) => {
            let text = text.trim();
            TEXT_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .or_else(|| {
                    TEXT_DATETIME_FORMATS
                        .iter()
                        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                        .map(|datetime| datetime.date())
                })
        }
        _ => None,
    }
}

/// Serial day numbers as stored by spreadsheets, counted from 1899-12-30.
/// Serials below 61 (1900-03-01) are rejected since spreadsheets count a
/// nonexistent 1900-02-29 before that point.
pub(crate) fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(61.0..3_000_000.0).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_days(Days::new(serial.floor() as u64))
}
