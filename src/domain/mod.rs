//! Domain layer - shared abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).

pub mod errors;

pub use errors::StoreError;
