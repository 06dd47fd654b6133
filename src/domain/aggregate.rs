use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::entities::record::{Dimension, KeyValue, Measure, Record, Reduction};
use crate::domain::entities::summary::{safe_div, Kpis, MeasureValue, SummaryRow};

#[derive(Default)]
struct GroupAcc {
    sums: Vec<f64>,
    count: usize,
}

/// Groups `records` by `group_by` and reduces each requested measure.
///
/// Only key combinations present in the input produce a row. Rows come back ordered
/// by their key tuple. An empty `group_by` yields a single total row, or nothing for an
/// empty input.
pub fn aggregate(
    records: &[Record],
    group_by: &[Dimension],
    reductions: &[(Measure, Reduction)],
) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<Vec<KeyValue>, GroupAcc> = BTreeMap::new();

    for record in records {
        let key: Vec<KeyValue> = group_by.iter().map(|dim| dim.key(record)).collect();
        let acc = groups.entry(key).or_insert_with(|| GroupAcc {
            sums: vec![0.0; reductions.len()],
            count: 0,
        });
        acc.count += 1;
        for (sum, (measure, _)) in acc.sums.iter_mut().zip(reductions) {
            *sum += measure.value(record);
        }
    }

    groups
        .into_iter()
        .map(|(key, acc)| SummaryRow {
            keys: group_by.iter().copied().zip(key).collect(),
            values: reductions
                .iter()
                .zip(&acc.sums)
                .map(|(&(measure, reduction), &sum)| MeasureValue {
                    measure,
                    reduction,
                    value: match reduction {
                        Reduction::Sum => sum,
                        Reduction::Mean => sum / acc.count as f64,
                        Reduction::Count => acc.count as f64,
                    },
                })
                .collect(),
            row_count: acc.count,
        })
        .collect()
}

/// Reorders `rows` by the given reduced value, largest first. Rows missing the value
/// sort last; equal values keep their current order.
pub fn sort_by_measure(rows: &mut [SummaryRow], measure: Measure, reduction: Reduction) {
    rows.sort_by(|a, b| {
        match (a.value(measure, reduction), b.value(measure, reduction)) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// The `n` groups of `group_by` with the largest summed `rank`.
///
/// Each row carries summed revenue, margin value and quantity alongside the ranked
/// measure. Ties are broken by the key, ascending.
pub fn top_n(records: &[Record], group_by: Dimension, rank: Measure, n: usize) -> Vec<SummaryRow> {
    let mut reductions = vec![
        (Measure::Revenue, Reduction::Sum),
        (Measure::MarginValue, Reduction::Sum),
        (Measure::Quantity, Reduction::Sum),
    ];
    if !reductions.contains(&(rank, Reduction::Sum)) {
        reductions.push((rank, Reduction::Sum));
    }

    let mut rows = aggregate(records, &[group_by], &reductions);
    rows.sort_by(|a, b| {
        let a_value = a.sum(rank).unwrap_or(0.0);
        let b_value = b.sum(rank).unwrap_or(0.0);
        b_value
            .total_cmp(&a_value)
            .then_with(|| a.key(group_by).cmp(&b.key(group_by)))
    });
    rows.truncate(n);
    rows
}

pub fn kpis(records: &[Record]) -> Kpis {
    let mut kpis = records.iter().fold(Kpis::default(), |mut acc, record| {
        acc.revenue += record.revenue;
        acc.margin_value += record.margin_value;
        acc.quantity += record.quantity;
        acc.record_count += 1;
        acc
    });
    kpis.margin_percent = safe_div(kpis.margin_value, kpis.revenue);
    kpis
}
