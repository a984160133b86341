//! Filter composition over the loan detail table.
//!
//! A page combines one inclusive date range on the loan date with any number
//! of exact-match category constraints (logical AND). Filtering to an empty
//! result is valid; downstream aggregation treats it as "no data".

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{Categorical, LoanDetail};

/// A single category constraint: either the wildcard ("(Semua)" in the UI)
/// or an exact value match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    Is(String),
}

impl Selection {
    /// Query-parameter convention: absent parameter means the wildcard.
    pub fn from_param(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Selection::Is(v),
            _ => Selection::All,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Selection::Is(_))
    }
}

/// Recognized filter options for the loans page.
#[derive(Clone, Debug, PartialEq)]
pub struct LoanFilter {
    /// Inclusive on both ends, compared at day granularity.
    pub date_range: (NaiveDate, NaiveDate),
    /// (column name, constraint) pairs, ANDed together.
    pub categories: Vec<(String, Selection)>,
}

impl LoanFilter {
    pub fn matches(&self, row: &LoanDetail) -> bool {
        let (start, end) = self.date_range;
        if row.tgl_pinjam < start || row.tgl_pinjam > end {
            return false;
        }
        self.categories.iter().all(|(column, selection)| {
            match selection {
                Selection::All => true,
                // An unknown column or a null cell matches nothing.
                Selection::Is(wanted) => {
                    matches!(row.category(column), Some(Some(v)) if v == wanted)
                }
            }
        })
    }

    /// Filtered subset of `rows`, re-sorted by loan date descending
    /// regardless of input order.
    pub fn apply(&self, rows: &[LoanDetail]) -> Vec<LoanDetail> {
        let mut out: Vec<LoanDetail> = rows.iter().filter(|r| self.matches(r)).cloned().collect();
        out.sort_by(|a, b| b.tgl_pinjam.cmp(&a.tgl_pinjam));
        out
    }
}

/// Apply exact-match category constraints without a date dimension
/// (books page filters).
pub fn apply_categories<T: Categorical + Clone>(
    rows: &[T],
    categories: &[(String, Selection)],
) -> Vec<T> {
    rows.iter()
        .filter(|row| {
            categories.iter().all(|(column, selection)| match selection {
                Selection::All => true,
                Selection::Is(wanted) => {
                    matches!(row.category(column), Some(Some(v)) if v == wanted)
                }
            })
        })
        .cloned()
        .collect()
}

/// Selectable values for a filter column: the sorted distinct non-null
/// values present in the *unfiltered* base table, so the option list does
/// not shrink as other filters are applied.
pub fn options<T: Categorical>(rows: &[T], column: &str) -> Vec<String> {
    let values: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| row.category(column).flatten())
        .map(str::to_string)
        .collect();
    values.into_iter().collect()
}

/// Earliest and latest loan date in the base table, for the pickable range.
pub fn date_bounds(rows: &[LoanDetail]) -> Option<(NaiveDate, NaiveDate)> {
    let min = rows.iter().map(|r| r.tgl_pinjam).min()?;
    let max = rows.iter().map(|r| r.tgl_pinjam).max()?;
    Some((min, max))
}

/// Case-insensitive substring search (member names, book titles).
pub fn search_contains<T: Clone>(
    rows: &[T],
    field: impl Fn(&T) -> &str,
    needle: &str,
) -> Vec<T> {
    if needle.is_empty() {
        return rows.to_vec();
    }
    let needle = needle.to_lowercase();
    rows.iter()
        .filter(|row| field(row).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
