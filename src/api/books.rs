//! Books page: searchable collection table with category/status filters.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analytics::aggregate::{count_by, count_by_ranked, count_by_year};
use crate::analytics::charts;
use crate::analytics::export::to_csv;
use crate::analytics::filter::{apply_categories, options, search_contains, Selection};
use crate::api::{store_failure, NO_DATA_MESSAGE};
use crate::db::AppState;
use crate::models::BookRow;

#[derive(Debug, Deserialize)]
pub struct BookPageQuery {
    pub search: Option<String>,
    pub kategori_buku: Option<String>,
    pub status_buku: Option<String>,
}

fn filtered_view(base: &[BookRow], query: &BookPageQuery) -> Vec<BookRow> {
    let needle = query.search.clone().unwrap_or_default();
    let searched = search_contains(base, |b| b.judul.as_str(), &needle);
    let categories = vec![
        (
            "kategori_buku".to_string(),
            Selection::from_param(query.kategori_buku.clone()),
        ),
        (
            "status_buku".to_string(),
            Selection::from_param(query.status_buku.clone()),
        ),
    ];
    apply_categories(&searched, &categories)
}

pub async fn books_page(
    State(state): State<AppState>,
    Query(query): Query<BookPageQuery>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let base = state
        .cache
        .books(&state.conn)
        .await
        .map_err(store_failure)?;

    if base.is_empty() {
        return Ok(Json(json!({
            "message": "Belum ada data buku pada database.",
            "rows": [],
            "charts": Value::Null,
        })));
    }

    let rows = filtered_view(&base, &query);

    let per_kategori = count_by_ranked(&rows, "kategori_buku");
    let per_status = count_by(&rows, "status_buku");
    let per_tahun = count_by_year(&rows, |b| b.tahun_terbit);

    Ok(Json(json!({
        "message": Value::Null,
        // Option lists always derive from the unfiltered base table.
        "filter_options": {
            "kategori_buku": options(base.as_slice(), "kategori_buku"),
            "status_buku": options(base.as_slice(), "status_buku"),
        },
        "rows": rows,
        "charts": {
            "per_kategori": charts::books_per_category(&per_kategori),
            "per_status": charts::books_per_status(&per_status),
            "per_tahun": charts::books_per_year(&per_tahun),
        },
        "tables": {
            "per_kategori": per_kategori,
            "per_status": per_status,
            "per_tahun": per_tahun,
        },
        "no_data_message": if rows.is_empty() { Some(NO_DATA_MESSAGE) } else { None },
    })))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<BookPageQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let base = state
        .cache
        .books(&state.conn)
        .await
        .map_err(store_failure)?;

    let rows = filtered_view(&base, &query);

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
        "attachment; filename=\"buku.csv\""
            .parse()
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "header".to_string()))?,
    );

    Ok((StatusCode::OK, headers, body))
}
