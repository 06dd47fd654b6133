use std::collections::BTreeSet;

use crate::domain::entities::record::{Dimension, KeyValue, Record};
use crate::domain::entities::selection::Selection;

/// Records matching `selection`, in input order.
pub fn filter(records: &[Record], selection: &Selection) -> Vec<Record> {
    if selection.is_unconstrained() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| selection.matches(record))
        .cloned()
        .collect()
}

/// Distinct values of `dimension` in `records`, sorted.
pub fn domain(records: &[Record], dimension: Dimension) -> Vec<KeyValue> {
    records
        .iter()
        .map(|record| dimension.key(record))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
