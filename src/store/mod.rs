//! Schema access: named read queries against the `seperlima` store and the
//! process-wide immutable snapshot cache built on top of them.

pub mod cache;
pub mod queries;

pub use cache::SnapshotCache;
