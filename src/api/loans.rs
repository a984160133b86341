//! Loans page: filterable loan table, filtered KPIs, charts and CSV export.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analytics::aggregate::{count_by, cross_tab, top_n};
use crate::analytics::charts;
use crate::analytics::export::to_csv;
use crate::analytics::filter::{date_bounds, options, LoanFilter, Selection};
use crate::analytics::kpi::{format_durasi, format_rupiah, loan_kpis};
use crate::api::{store_failure, NO_DATA_MESSAGE};
use crate::db::AppState;
use crate::models::LoanDetail;

/// Columns the loans page may constrain, in display order.
const FILTER_COLUMNS: &[&str] = &[
    "nama_fakultas",
    "nama_prodi",
    "status_anggota",
    "status_peminjaman",
    "kategori_buku",
];

#[derive(Debug, Deserialize)]
pub struct LoanPageQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub nama_fakultas: Option<String>,
    pub nama_prodi: Option<String>,
    pub status_anggota: Option<String>,
    pub status_peminjaman: Option<String>,
    pub kategori_buku: Option<String>,
}

impl LoanPageQuery {
    fn selection(&self, column: &str) -> Selection {
        let value = match column {
            "nama_fakultas" => self.nama_fakultas.clone(),
            "nama_prodi" => self.nama_prodi.clone(),
            "status_anggota" => self.status_anggota.clone(),
            "status_peminjaman" => self.status_peminjaman.clone(),
            "kategori_buku" => self.kategori_buku.clone(),
            _ => None,
        };
        Selection::from_param(value)
    }

    /// Compose the page filter against the base table. Absent date bounds
    /// fall back to the full span of the data; `None` when the base table
    /// itself is empty.
    fn compose(&self, base: &[LoanDetail]) -> Option<LoanFilter> {
        let (min, max) = date_bounds(base)?;
        let start = self.start.unwrap_or(min);
        let end = self.end.unwrap_or(max);

        let categories = FILTER_COLUMNS
            .iter()
            .map(|column| (column.to_string(), self.selection(column)))
            .collect();

        Some(LoanFilter {
            date_range: (start, end),
            categories,
        })
    }
}

/// One-line description of the active filter combination.
fn filter_caption(filter: &LoanFilter) -> String {
    let (start, end) = filter.date_range;
    let mut caption = format!("Data ditampilkan untuk periode {} sampai {}", start, end);
    let labels = [
        ("nama_fakultas", "fakultas", "semua fakultas"),
        ("nama_prodi", "program studi", "semua program studi"),
        ("status_anggota", "status anggota", "semua status anggota"),
        ("status_peminjaman", "status peminjaman", "semua status peminjaman"),
        ("kategori_buku", "kategori", "semua kategori buku"),
    ];
    for (column, label, all_label) in labels {
        let part = filter
            .categories
            .iter()
            .find(|(c, _)| c == column)
            .and_then(|(_, s)| match s {
                Selection::Is(v) => Some(format!(", {} {}", label, v)),
                Selection::All => None,
            })
            .unwrap_or_else(|| format!(", {}", all_label));
        caption.push_str(&part);
    }
    caption.push('.');
    caption
}

pub async fn loans_page(
    State(state): State<AppState>,
    Query(query): Query<LoanPageQuery>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let base = state
        .cache
        .loans(&state.conn)
        .await
        .map_err(store_failure)?;

    let Some(filter) = query.compose(&base) else {
        return Ok(Json(json!({
            "message": "Belum ada data peminjaman pada database.",
            "rows": [],
            "charts": Value::Null,
        })));
    };

    // Option lists come from the unfiltered base so they do not shrink as
    // other filters are applied.
    let filter_options: Value = FILTER_COLUMNS
        .iter()
        .map(|column| (column.to_string(), json!(options(base.as_slice(), column))))
        .collect::<serde_json::Map<String, Value>>()
        .into();
    let bounds = date_bounds(&base);

    let rows = filter.apply(&base);
    let kpis = loan_kpis(&rows);

    let per_status = count_by(&rows, "status_peminjaman");
    let top_judul = top_n(&rows, "judul", 5);
    let durations: Vec<i64> = rows.iter().filter_map(|r| r.durasi_peminjaman).collect();
    let heatmap_cells = cross_tab(&rows, "nama_fakultas", "kategori_buku");
    let boxplot_samples: Vec<(String, i64)> = rows
        .iter()
        .filter_map(|r| {
            let fakultas = r.nama_fakultas.clone()?;
            let durasi = r.durasi_peminjaman?;
            Some((fakultas, durasi))
        })
        .collect();

    Ok(Json(json!({
        "message": Value::Null,
        "caption": filter_caption(&filter),
        "periode": {
            "start": filter.date_range.0,
            "end": filter.date_range.1,
            "min": bounds.map(|b| b.0),
            "max": bounds.map(|b| b.1),
        },
        "filter_options": filter_options,
        "rows": rows,
        "kpi": {
            "jumlah_peminjaman": kpis.total_peminjaman,
            "total_denda": kpis.total_denda,
            "total_denda_display": format_rupiah(kpis.total_denda),
            "rata_durasi": kpis.rata_durasi,
            "rata_durasi_display": format_durasi(kpis.rata_durasi),
        },
        "charts": {
            "per_status": charts::loans_per_status(&per_status),
            "top_judul": charts::top_titles(&top_judul),
            "hist_durasi": charts::duration_histogram(&durations),
            "fakultas_kategori": charts::faculty_category_heatmap(&heatmap_cells),
            "boxplot_durasi": charts::duration_boxplot(&boxplot_samples),
        },
        "tables": {
            "per_status": per_status,
            "top_judul": top_judul,
        },
        "highlights": {
            "judul_teratas": top_judul.first().map(|t| format!(
                "Judul dengan peminjaman tertinggi adalah \"{}\" sebanyak {} kali.",
                t.key, t.jumlah
            )),
        },
        "no_data_message": if rows.is_empty() { Some(NO_DATA_MESSAGE) } else { None },
    })))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<LoanPageQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let base = state
        .cache
        .loans(&state.conn)
        .await
        .map_err(store_failure)?;

    let rows = match query.compose(&base) {
        Some(filter) => filter.apply(&base),
        None => Vec::new(),
    };

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
        "attachment; filename=\"peminjaman_filtered.csv\""
            .parse()
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "header".to_string()))?,
    );

    Ok((StatusCode::OK, headers, body))
}
