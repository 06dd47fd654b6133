use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::record::{Dimension, KeyValue, Record};

/// Allowed values per dimension.
///
/// Dimensions without an entry are unconstrained. A dimension mapped to an empty set
/// matches nothing, so callers wanting "no filtering" should start from [`Selection::all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    allowed: BTreeMap<Dimension, BTreeSet<KeyValue>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value observed in `records` selected, for each of `dimensions`.
    pub fn all(records: &[Record], dimensions: &[Dimension]) -> Self {
        let mut selection = Self::new();
        for &dimension in dimensions {
            let values = records.iter().map(|record| dimension.key(record)).collect();
            selection.allowed.insert(dimension, values);
        }
        selection
    }

    pub fn allow<I, V>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<KeyValue>,
    {
        self.set(dimension, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn set(&mut self, dimension: Dimension, values: BTreeSet<KeyValue>) {
        self.allowed.insert(dimension, values);
    }

    pub fn clear(&mut self, dimension: Dimension) {
        self.allowed.remove(&dimension);
    }

    pub fn allowed(&self, dimension: Dimension) -> Option<&BTreeSet<KeyValue>> {
        self.allowed.get(&dimension)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.allowed
            .iter()
            .all(|(dimension, values)| values.contains(&dimension.key(record)))
    }
}
