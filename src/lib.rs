//! Invoice billing sheet loading, filtering and revenue/margin aggregation.

pub mod config;
pub mod domain;
pub mod infra;
pub mod usecase;

pub use domain::aggregate::{aggregate, kpis, sort_by_measure, top_n};
pub use domain::breakdown::Breakdown;
pub use domain::entities::dataset::{CoercionReport, Dataset};
pub use domain::entities::raw_table::{Cell, RawTable};
pub use domain::entities::record::{Dimension, KeyValue, Measure, Period, Record, Reduction};
pub use domain::entities::selection::Selection;
pub use domain::entities::summary::{Kpis, MeasureValue, SummaryRow};
pub use domain::error::DataLoadError;
pub use domain::filter::{domain as dimension_values, filter};
pub use domain::normalize::{normalize, MarginPolicy, NormalizeOptions};
