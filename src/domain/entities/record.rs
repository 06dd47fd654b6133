use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Calendar month of an invoice, ordered chronologically and rendered as `MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// One normalized invoice line.
///
/// Numeric fields are always finite. Cells that could not be read as numbers were
/// replaced by zero during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub division: String,
    pub client: String,
    pub material: String,
    pub operation_type: String,
    pub export_flag: String,
    pub issue_date: NaiveDate,
    pub revenue: f64,
    pub product_cost: f64,
    pub margin_value: f64,
    pub margin_percent: f64,
    pub quantity: f64,
    pub period: Period,
    pub year: i32,
}

impl Record {
    pub fn period_label(&self) -> String {
        self.period.to_string()
    }
}

/// Categorical fields a record can be filtered or grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Division,
    Client,
    Material,
    OperationType,
    ExportFlag,
    Year,
    Period,
}

impl Dimension {
    pub fn key(self, record: &Record) -> KeyValue {
        match self {
            Dimension::Division => KeyValue::Text(record.division.clone()),
            Dimension::Client => KeyValue::Text(record.client.clone()),
            Dimension::Material => KeyValue::Text(record.material.clone()),
            Dimension::OperationType => KeyValue::Text(record.operation_type.clone()),
            Dimension::ExportFlag => KeyValue::Text(record.export_flag.clone()),
            Dimension::Year => KeyValue::Year(record.year),
            Dimension::Period => KeyValue::Period(record.period),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Division => "division",
            Dimension::Client => "client",
            Dimension::Material => "material",
            Dimension::OperationType => "operation_type",
            Dimension::ExportFlag => "export_flag",
            Dimension::Year => "year",
            Dimension::Period => "period",
        }
    }
}

/// Numeric fields a record can be reduced over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Measure {
    Revenue,
    ProductCost,
    MarginValue,
    MarginPercent,
    Quantity,
}

impl Measure {
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Measure::Revenue => record.revenue,
            Measure::ProductCost => record.product_cost,
            Measure::MarginValue => record.margin_value,
            Measure::MarginPercent => record.margin_percent,
            Measure::Quantity => record.quantity,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Measure::Revenue => "revenue",
            Measure::ProductCost => "product_cost",
            Measure::MarginValue => "margin_value",
            Measure::MarginPercent => "margin_percent",
            Measure::Quantity => "quantity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    Sum,
    /// Arithmetic mean of the per-record values in the group.
    Mean,
    Count,
}

impl Reduction {
    pub fn as_str(self) -> &'static str {
        match self {
            Reduction::Sum => "sum",
            Reduction::Mean => "mean",
            Reduction::Count => "count",
        }
    }
}

/// Value of one dimension for one record.
///
/// Text sorts lexically, years numerically and periods chronologically. Values of
/// different variants never share a dimension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyValue {
    Text(String),
    Year(i32),
    Period(Period),
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::Text(value.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        KeyValue::Text(value)
    }
}

impl From<i32> for KeyValue {
    fn from(value: i32) -> Self {
        KeyValue::Year(value)
    }
}

impl From<Period> for KeyValue {
    fn from(value: Period) -> Self {
        KeyValue::Period(value)
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Text(text) => f.write_str(text),
            KeyValue::Year(year) => write!(f, "{year}"),
            KeyValue::Period(period) => write!(f, "{period}"),
        }
    }
}
