//! The testable core of the dashboard: pure functions from tidy row slices
//! to derived summary tables, chart specs, KPI values and CSV exports.
//!
//! Nothing in this module touches the database or the HTTP layer; every
//! function is a pure function of its input rows and parameters.

pub mod aggregate;
pub mod charts;
pub mod export;
pub mod filter;
pub mod kpi;
