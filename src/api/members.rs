//! Members page: searchable member table with status/faculty distribution.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analytics::aggregate::{count_by, count_by_ranked, cross_tab};
use crate::analytics::charts;
use crate::analytics::export::to_csv;
use crate::analytics::filter::search_contains;
use crate::api::{store_failure, NO_DATA_MESSAGE};
use crate::db::AppState;

#[derive(Debug, Deserialize)]
pub struct MemberPageQuery {
    pub search: Option<String>,
}

pub async fn members_page(
    State(state): State<AppState>,
    Query(query): Query<MemberPageQuery>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let base = state
        .cache
        .members(&state.conn)
        .await
        .map_err(store_failure)?;

    if base.is_empty() {
        return Ok(Json(json!({
            "message": "Belum ada data anggota pada database.",
            "rows": [],
            "charts": Value::Null,
        })));
    }

    let needle = query.search.unwrap_or_default();
    let rows = search_contains(base.as_slice(), |m| m.nama_anggota.as_str(), &needle);

    let per_status = count_by(&rows, "status_anggota");
    let per_fakultas = count_by_ranked(&rows, "nama_fakultas");
    let treemap_cells = cross_tab(&rows, "nama_fakultas", "nama_prodi");

    Ok(Json(json!({
        "message": Value::Null,
        "rows": rows,
        "charts": {
            "per_status": charts::members_per_status(&per_status),
            "per_fakultas": charts::members_per_faculty(&per_fakultas),
            "sebaran_prodi": charts::member_treemap(&treemap_cells),
        },
        "tables": {
            "per_status": per_status,
            "per_fakultas": per_fakultas,
        },
        "no_data_message": if rows.is_empty() { Some(NO_DATA_MESSAGE) } else { None },
    })))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<MemberPageQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let base = state
        .cache
        .members(&state.conn)
        .await
        .map_err(store_failure)?;

    let needle = query.search.unwrap_or_default();
    let rows = search_contains(base.as_slice(), |m| m.nama_anggota.as_str(), &needle);

    let body = to_csv(&rows).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        "text/csv; charset=utf-8"
            .parse()
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "header".to_string()))?,
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        "attachment; filename=\"anggota.csv\""
            .parse()
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "header".to_string()))?,
    );

    Ok((StatusCode::OK, headers, body))
}
