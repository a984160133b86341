//! Domain error types
//!
//! These errors are framework-agnostic and represent the failure taxonomy of
//! the dashboard: a store failure is fatal to the current page view, while an
//! empty result or a missing column is an ordinary value, never an error.

use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    /// The database could not be reached
    Connection(String),
    /// A query failed at the store boundary
    Query(String),
    /// A value came back in a shape we cannot normalize (e.g. a bad date)
    Malformed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connection(msg) => write!(f, "Database connection error: {}", msg),
            StoreError::Query(msg) => write!(f, "Query error: {}", msg),
            StoreError::Malformed(msg) => write!(f, "Malformed store value: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// Conversion from SeaORM errors (used in the store layer)
impl From<sea_orm::DbErr> for StoreError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::Conn(err) => StoreError::Connection(err.to_string()),
            sea_orm::DbErr::ConnectionAcquire(err) => StoreError::Connection(err.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}
