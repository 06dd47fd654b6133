use std::sync::Arc;

use crate::domain::aggregate::{aggregate, kpis, top_n};
use crate::domain::breakdown::Breakdown;
use crate::domain::entities::dataset::{CoercionReport, Dataset};
use crate::domain::entities::record::{Dimension, KeyValue, Measure, Record, Reduction};
use crate::domain::entities::selection::Selection;
use crate::domain::entities::summary::{Kpis, SummaryRow};
use crate::domain::filter::{domain, filter};

/// Read-only queries over one loaded dataset.
pub struct QueryService {
    dataset: Arc<Dataset>,
}

impl QueryService {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn records(&self) -> &[Record] {
        &self.dataset.records
    }

    pub fn coercions(&self) -> &CoercionReport {
        &self.dataset.coercions
    }

    pub fn options(&self, dimension: Dimension) -> Vec<KeyValue> {
        domain(self.records(), dimension)
    }

    /// Selection with every observed value of `dimensions` allowed.
    pub fn select_all(&self, dimensions: &[Dimension]) -> Selection {
        Selection::all(self.records(), dimensions)
    }

    pub fn filtered(&self, selection: &Selection) -> Vec<Record> {
        filter(self.records(), selection)
    }

    pub fn kpis(&self, selection: &Selection) -> Kpis {
        kpis(&self.filtered(selection))
    }

    pub fn breakdown(&self, selection: &Selection, breakdown: Breakdown) -> Vec<SummaryRow> {
        breakdown.run(&self.filtered(selection))
    }

    pub fn aggregate(
        &self,
        selection: &Selection,
        group_by: &[Dimension],
        reductions: &[(Measure, Reduction)],
    ) -> Vec<SummaryRow> {
        aggregate(&self.filtered(selection), group_by, reductions)
    }

    pub fn top(
        &self,
        selection: &Selection,
        group_by: Dimension,
        rank: Measure,
        n: usize,
    ) -> Vec<SummaryRow> {
        top_n(&self.filtered(selection), group_by, rank, n)
    }
}
