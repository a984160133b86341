pub mod books;
pub mod health;
pub mod loans;
pub mod members;
pub mod reference;
pub mod summary;

use axum::http::StatusCode;
use axum::{routing::get, Router};

use crate::db::AppState;
use crate::domain::StoreError;

/// Standard placeholder text for an empty filtered result.
pub const NO_DATA_MESSAGE: &str = "Data tidak tersedia untuk kombinasi filter yang dipilih.";

/// Map a store failure to an HTTP response. A load failure is fatal to the
/// current page view only; the cache and other pages are unaffected.
pub fn store_failure(e: StoreError) -> (StatusCode, String) {
    let status = match e {
        StoreError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!("store failure: {}", e);
    (
        status,
        format!("Gagal memuat data dari database. Periksa koneksi ke MySQL. ({})", e),
    )
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Summary page
        .route("/summary", get(summary::summary))
        // Loans page
        .route("/loans", get(loans::loans_page))
        .route("/loans/export.csv", get(loans::export_csv))
        // Members page
        .route("/members", get(members::members_page))
        .route("/members/export.csv", get(members::export_csv))
        // Books page
        .route("/books", get(books::books_page))
        .route("/books/export.csv", get(books::export_csv))
        // Reference tables page
        .route("/reference", get(reference::reference_tables))
        .with_state(state)
}
