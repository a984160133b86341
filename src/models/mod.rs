pub mod book;
pub mod loan;
pub mod member;
pub mod reference;

pub use book::BookRow;
pub use loan::{LoanDetail, LoanStatus};
pub use member::MemberRow;

/// Name-addressed access to the categorical columns of a tidy row.
///
/// The filter composer and the aggregation layer address grouping columns by
/// their store column name. `None` means the column does not exist on this
/// row type (a schema mismatch, handled as "no data" downstream); `Some(None)`
/// means the column exists but the cell is null for this row.
pub trait Categorical {
    fn category(&self, column: &str) -> Option<Option<&str>>;
}
