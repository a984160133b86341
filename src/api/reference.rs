//! Reference page: the seven flat reference tables in one payload.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::api::store_failure;
use crate::db::AppState;

pub async fn reference_tables(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let reference = state
        .cache
        .reference(&state.conn)
        .await
        .map_err(store_failure)?;

    Ok(Json(json!({
        "fakultas": reference.fakultas,
        "program_studi": reference.program_studi,
        "pengarang": reference.pengarang,
        "buku_pengarang": reference.buku_pengarang,
        "petugas": reference.petugas,
        "judul": reference.judul,
        "klasifikasi": reference.klasifikasi,
    })))
}
