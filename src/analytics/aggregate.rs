//! Grouping and aggregation over tidy row slices.
//!
//! All operations return a possibly-empty `Vec` as their result; an empty
//! input, or a grouping column the row type does not have, yields an empty
//! output instead of an error. Null category cells are skipped by grouping
//! (they still appear in tables and exports).
//!
//! Group order is first-encounter order unless an operation says otherwise;
//! ranked operations sort by count descending with a stable sort, so ties
//! keep their encounter order.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Categorical;

/// One group of a single-column count aggregation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub jumlah: u64,
}

/// One group of a single-column mean aggregation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub key: String,
    pub rata: f64,
}

/// Loan count per calendar month bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub bulan: String,
    pub jumlah: u64,
}

/// Loan count per (month, category) pair, long-form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGroupCount {
    pub bulan: String,
    pub key: String,
    pub jumlah: u64,
}

/// Count per publication year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub tahun: i64,
    pub jumlah: u64,
}

/// Long-form two-way cross tabulation cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCount {
    pub key_a: String,
    pub key_b: String,
    pub jumlah: u64,
}

/// Truncate a date to its calendar month bucket, `YYYY-MM`.
pub fn month_bucket(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Count rows per distinct value of `column`, in first-encounter order.
pub fn count_by<T: Categorical>(rows: &[T], column: &str) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let Some(Some(value)) = row.category(column) else {
            continue;
        };
        match index.get(value) {
            Some(&i) => groups[i].jumlah += 1,
            None => {
                index.insert(value.to_string(), groups.len());
                groups.push(GroupCount {
                    key: value.to_string(),
                    jumlah: 1,
                });
            }
        }
    }

    groups
}

/// Count rows per distinct value of `column`, sorted by count descending.
/// The sort is stable: ties keep their first-encounter order.
pub fn count_by_ranked<T: Categorical>(rows: &[T], column: &str) -> Vec<GroupCount> {
    let mut groups = count_by(rows, column);
    groups.sort_by(|a, b| b.jumlah.cmp(&a.jumlah));
    groups
}

/// The `n` most frequent values of `column`. Returns fewer than `n` rows
/// when the input has fewer distinct groups; never pads.
pub fn top_n<T: Categorical>(rows: &[T], column: &str, n: usize) -> Vec<GroupCount> {
    let mut groups = count_by_ranked(rows, column);
    groups.truncate(n);
    groups
}

/// Count rows per calendar month of the date yielded by `date_fn`,
/// ascending by month.
pub fn count_by_month<T>(rows: &[T], date_fn: impl Fn(&T) -> NaiveDate) -> Vec<MonthCount> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for row in rows {
        *counts.entry(month_bucket(date_fn(row))).or_insert(0) += 1;
    }

    let mut buckets: Vec<MonthCount> = counts
        .into_iter()
        .map(|(bulan, jumlah)| MonthCount { bulan, jumlah })
        .collect();
    buckets.sort_by(|a, b| a.bulan.cmp(&b.bulan));
    buckets
}

/// Count rows per (month, `column` value) pair, long-form, sorted by month
/// then category label. Combinations absent from the data are omitted, never
/// zero-filled.
pub fn count_by_month_and<T: Categorical>(
    rows: &[T],
    date_fn: impl Fn(&T) -> NaiveDate,
    column: &str,
) -> Vec<MonthGroupCount> {
    let mut counts: HashMap<(String, String), u64> = HashMap::new();
    for row in rows {
        let Some(Some(value)) = row.category(column) else {
            continue;
        };
        let pair = (month_bucket(date_fn(row)), value.to_string());
        *counts.entry(pair).or_insert(0) += 1;
    }

    let mut cells: Vec<MonthGroupCount> = counts
        .into_iter()
        .map(|((bulan, key), jumlah)| MonthGroupCount { bulan, key, jumlah })
        .collect();
    cells.sort_by(|a, b| (&a.bulan, &a.key).cmp(&(&b.bulan, &b.key)));
    cells
}

/// Arithmetic mean of `value_fn` per distinct value of `column`, over rows
/// where the value is non-null. Groups with zero non-null observations are
/// excluded from the output entirely, never emitted as NaN or zero.
pub fn mean_by<T: Categorical>(
    rows: &[T],
    column: &str,
    value_fn: impl Fn(&T) -> Option<f64>,
) -> Vec<GroupMean> {
    let mut sums: Vec<(String, f64, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let Some(Some(key)) = row.category(column) else {
            continue;
        };
        let Some(value) = value_fn(row) else {
            continue;
        };
        match index.get(key) {
            Some(&i) => {
                sums[i].1 += value;
                sums[i].2 += 1;
            }
            None => {
                index.insert(key.to_string(), sums.len());
                sums.push((key.to_string(), value, 1));
            }
        }
    }

    sums.into_iter()
        .map(|(key, sum, count)| GroupMean {
            key,
            rata: sum / count as f64,
        })
        .collect()
}

/// The bucket holding the maximum count. Ties resolve to the earliest
/// month, per the ascending order `count_by_month` produces.
pub fn peak_month(per_bulan: &[MonthCount]) -> Option<&MonthCount> {
    let mut best: Option<&MonthCount> = None;
    for bucket in per_bulan {
        match best {
            Some(b) if b.jumlah >= bucket.jumlah => {}
            _ => best = Some(bucket),
        }
    }
    best
}

/// Count rows per distinct year yielded by `year_fn`, ascending by year.
pub fn count_by_year<T>(rows: &[T], year_fn: impl Fn(&T) -> Option<i64>) -> Vec<YearCount> {
    let mut counts: HashMap<i64, u64> = HashMap::new();
    for row in rows {
        let Some(year) = year_fn(row) else {
            continue;
        };
        *counts.entry(year).or_insert(0) += 1;
    }

    let mut years: Vec<YearCount> = counts
        .into_iter()
        .map(|(tahun, jumlah)| YearCount { tahun, jumlah })
        .collect();
    years.sort_by_key(|y| y.tahun);
    years
}

/// Two-way cross tabulation of `column_a` against `column_b`, long-form:
/// one cell per observed pair in first-encounter order. Pairs never observed
/// are absent rather than zero.
pub fn cross_tab<T: Categorical>(rows: &[T], column_a: &str, column_b: &str) -> Vec<PairCount> {
    let mut cells: Vec<PairCount> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for row in rows {
        let Some(Some(a)) = row.category(column_a) else {
            continue;
        };
        let Some(Some(b)) = row.category(column_b) else {
            continue;
        };
        let pair = (a.to_string(), b.to_string());
        match index.get(&pair) {
            Some(&i) => cells[i].jumlah += 1,
            None => {
                index.insert(pair.clone(), cells.len());
                cells.push(PairCount {
                    key_a: pair.0,
                    key_b: pair.1,
                    jumlah: 1,
                });
            }
        }
    }

    cells
}
