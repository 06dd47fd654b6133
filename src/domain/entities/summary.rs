use crate::domain::entities::record::{Dimension, KeyValue, Measure, Reduction};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureValue {
    pub measure: Measure,
    pub reduction: Reduction,
    pub value: f64,
}

/// One grouped aggregate: the key values in grouping order plus one reduced value per
/// requested (measure, reduction) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub keys: Vec<(Dimension, KeyValue)>,
    pub values: Vec<MeasureValue>,
    pub row_count: usize,
}

impl SummaryRow {
    pub fn key(&self, dimension: Dimension) -> Option<&KeyValue> {
        self.keys
            .iter()
            .find(|(dim, _)| *dim == dimension)
            .map(|(_, value)| value)
    }

    pub fn value(&self, measure: Measure, reduction: Reduction) -> Option<f64> {
        self.values
            .iter()
            .find(|entry| entry.measure == measure && entry.reduction == reduction)
            .map(|entry| entry.value)
    }

    pub fn sum(&self, measure: Measure) -> Option<f64> {
        self.value(measure, Reduction::Sum)
    }

    /// Summed margin over summed revenue, when both sums are present.
    pub fn margin_ratio(&self) -> Option<f64> {
        let margin = self.sum(Measure::MarginValue)?;
        let revenue = self.sum(Measure::Revenue)?;
        Some(safe_div(margin, revenue))
    }
}

/// Headline totals over a record set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kpis {
    pub revenue: f64,
    pub margin_value: f64,
    pub quantity: f64,
    pub record_count: usize,
    /// Ratio of summed margin to summed revenue, zero when there is no revenue.
    pub margin_percent: f64,
}

/// Zero when `denominator` is exactly zero.
pub(crate) fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
