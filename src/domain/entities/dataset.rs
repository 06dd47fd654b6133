use std::collections::BTreeMap;

use crate::domain::entities::record::Record;

/// Numeric cells replaced by zero during normalization, counted per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoercionReport {
    by_column: BTreeMap<String, usize>,
}

impl CoercionReport {
    pub fn record(&mut self, column: &str) {
        *self.by_column.entry(column.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, column: &str) -> usize {
        self.by_column.get(column).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.by_column.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }

    pub fn by_column(&self) -> &BTreeMap<String, usize> {
        &self.by_column
    }
}

/// A normalized snapshot of one source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub coercions: CoercionReport,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
