use crate::domain::aggregate::{aggregate, sort_by_measure};
use crate::domain::entities::record::{Dimension, Measure, Record, Reduction};
use crate::domain::entities::summary::SummaryRow;

/// Named summary tables shown by the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakdown {
    Monthly,
    Yearly,
    ClientDivision,
    ProductDivision,
    Operation,
    Export,
    ClientMargin,
    ProductMargin,
}

const REVENUE_AND_MARGIN: &[(Measure, Reduction)] = &[
    (Measure::Revenue, Reduction::Sum),
    (Measure::MarginValue, Reduction::Sum),
];

const REVENUE_ONLY: &[(Measure, Reduction)] = &[(Measure::Revenue, Reduction::Sum)];

// Average margin percent here is the per-record mean, not summed margin over summed revenue.
const MARGIN_ANALYTIC: &[(Measure, Reduction)] = &[
    (Measure::Revenue, Reduction::Sum),
    (Measure::MarginValue, Reduction::Sum),
    (Measure::Quantity, Reduction::Sum),
    (Measure::MarginPercent, Reduction::Mean),
];

impl Breakdown {
    pub const ALL: [Breakdown; 8] = [
        Breakdown::Monthly,
        Breakdown::Yearly,
        Breakdown::ClientDivision,
        Breakdown::ProductDivision,
        Breakdown::Operation,
        Breakdown::Export,
        Breakdown::ClientMargin,
        Breakdown::ProductMargin,
    ];

    pub fn group_by(self) -> &'static [Dimension] {
        match self {
            Breakdown::Monthly => &[Dimension::Period],
            Breakdown::Yearly => &[Dimension::Year],
            Breakdown::ClientDivision => &[Dimension::Client, Dimension::Division],
            Breakdown::ProductDivision => &[Dimension::Material, Dimension::Division],
            Breakdown::Operation => &[Dimension::OperationType],
            Breakdown::Export => &[Dimension::ExportFlag],
            Breakdown::ClientMargin => &[Dimension::Client],
            Breakdown::ProductMargin => &[Dimension::Material],
        }
    }

    pub fn reductions(self) -> &'static [(Measure, Reduction)] {
        match self {
            Breakdown::Monthly | Breakdown::Yearly => REVENUE_AND_MARGIN,
            Breakdown::ClientDivision | Breakdown::ProductDivision => REVENUE_AND_MARGIN,
            Breakdown::Operation | Breakdown::Export => REVENUE_ONLY,
            Breakdown::ClientMargin | Breakdown::ProductMargin => MARGIN_ANALYTIC,
        }
    }

    /// Whether rows are listed by revenue, largest first, instead of by key.
    pub fn ranked_by_revenue(self) -> bool {
        !matches!(
            self,
            Breakdown::Monthly | Breakdown::Yearly | Breakdown::Operation | Breakdown::Export
        )
    }

    pub fn run(self, records: &[Record]) -> Vec<SummaryRow> {
        let mut rows = aggregate(records, self.group_by(), self.reductions());
        if self.ranked_by_revenue() {
            sort_by_measure(&mut rows, Measure::Revenue, Reduction::Sum);
        }
        rows
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Breakdown::Monthly => "monthly",
            Breakdown::Yearly => "yearly",
            Breakdown::ClientDivision => "client-division",
            Breakdown::ProductDivision => "product-division",
            Breakdown::Operation => "operation",
            Breakdown::Export => "export",
            Breakdown::ClientMargin => "client-margin",
            Breakdown::ProductMargin => "product-margin",
        }
    }
}
