//! Pure aggregation over the full transaction set.
//!
//! Both reports are computed in one pass over a snapshot of the store with
//! local accumulator maps, so a report is always consistent with the snapshot
//! it was given. Rows whose stored type is neither "credit" nor "debit" are
//! skipped rather than failing the whole report.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::transaction::{TransactionKind, TransactionRecord};

use super::{category::categorize, week::week_start};

/// The credit, debit, and balance totals for one week of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAggregate {
    /// The Monday of the week this row covers.
    pub week: Date,
    /// The sum of credit amounts in the week.
    pub credit: f64,
    /// The sum of debit amounts in the week.
    pub debit: f64,
    /// Credit minus debit within this week, not cumulative across weeks.
    pub balance: f64,
}

/// The summed amount for one `(type, category)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    /// Whether this row sums credits or debits.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The normalized description the amounts were grouped by.
    pub category: String,
    /// The summed amount for this pair.
    pub amount: f64,
}

#[derive(Default)]
struct WeekTotals {
    credit: f64,
    debit: f64,
}

/// Aggregate transactions into one row per populated week, sorted ascending
/// by week-start date.
pub fn weekly_report(records: &[TransactionRecord]) -> Vec<WeeklyAggregate> {
    let mut buckets: HashMap<Date, WeekTotals> = HashMap::new();

    for record in records {
        let Ok(kind) = record.kind.parse::<TransactionKind>() else {
            continue;
        };

        let totals = buckets.entry(week_start(record.date)).or_default();
        match kind {
            TransactionKind::Credit => totals.credit += record.amount,
            TransactionKind::Debit => totals.debit += record.amount,
        }
    }

    let mut weeks: Vec<Date> = buckets.keys().copied().collect();
    weeks.sort();

    weeks
        .into_iter()
        .map(|week| {
            let totals = &buckets[&week];
            WeeklyAggregate {
                week,
                credit: totals.credit,
                debit: totals.debit,
                balance: totals.credit - totals.debit,
            }
        })
        .collect()
}

/// Aggregate transactions into one row per populated `(type, category)` pair.
///
/// Rows are emitted credits first, categories sorted within each type, to
/// keep responses reproducible; callers should not rely on the order beyond
/// the grouping.
pub fn breakdown_report(records: &[TransactionRecord]) -> Vec<CategoryAggregate> {
    let mut totals: HashMap<(TransactionKind, String), f64> = HashMap::new();

    for record in records {
        let Ok(kind) = record.kind.parse::<TransactionKind>() else {
            continue;
        };

        *totals
            .entry((kind, categorize(&record.description)))
            .or_insert(0.0) += record.amount;
    }

    let mut rows: Vec<CategoryAggregate> = totals
        .into_iter()
        .map(|((kind, category), amount)| CategoryAggregate {
            kind,
            category,
            amount,
        })
        .collect();

    rows.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.category.cmp(&b.category)));

    rows
}
