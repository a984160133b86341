//! Summary page: KPI cards plus the four overview charts.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::analytics::aggregate::{
    count_by_month, count_by_month_and, count_by_ranked, mean_by, peak_month,
};
use crate::analytics::charts;
use crate::analytics::kpi::{format_durasi, format_rupiah, loan_kpis};
use crate::api::store_failure;
use crate::db::AppState;

pub async fn summary(State(state): State<AppState>) -> Result<Json<Value>, (StatusCode, String)> {
    let loans = state
        .cache
        .loans(&state.conn)
        .await
        .map_err(store_failure)?;

    if loans.is_empty() {
        return Ok(Json(json!({
            "message": "Belum ada data peminjaman pada database.",
            "kpi": Value::Null,
            "charts": Value::Null,
            "tables": Value::Null,
            "highlights": Value::Null,
        })));
    }

    let kpis = loan_kpis(&loans);

    let tren = count_by_month_and(loans.as_slice(), |r| r.tgl_pinjam, "status_peminjaman");
    let per_bulan = count_by_month(loans.as_slice(), |r| r.tgl_pinjam);
    let per_fakultas = count_by_ranked(loans.as_slice(), "nama_fakultas");
    let per_kategori = count_by_ranked(loans.as_slice(), "kategori_buku");
    let mut durasi_fakultas = mean_by(loans.as_slice(), "nama_fakultas", |r| {
        r.durasi_peminjaman.map(|d| d as f64)
    });
    durasi_fakultas.sort_by(|a, b| b.rata.total_cmp(&a.rata));

    let highlights = json!({
        "bulan_puncak": peak_month(&per_bulan).map(|p| format!(
            "Periode dengan jumlah peminjaman tertinggi adalah {} dengan {} transaksi.",
            p.bulan, p.jumlah
        )),
        "fakultas_teratas": per_fakultas.first().map(|f| format!(
            "Fakultas dengan jumlah peminjaman tertinggi adalah {} dengan {} transaksi.",
            f.key, f.jumlah
        )),
        "kategori_teratas": per_kategori.first().map(|k| format!(
            "Kategori buku dengan peminjaman tertinggi adalah {} dengan {} transaksi.",
            k.key, k.jumlah
        )),
        "durasi_terlama": durasi_fakultas.first().map(|d| format!(
            "Fakultas dengan rata-rata durasi peminjaman paling lama adalah {} dengan rata-rata {:.1} hari.",
            d.key, d.rata
        )),
    });

    Ok(Json(json!({
        "message": Value::Null,
        "kpi": {
            "total_peminjaman": kpis.total_peminjaman,
            "anggota_aktif": kpis.anggota_aktif,
            "buku_dipinjam": kpis.buku_dipinjam,
            "total_denda": kpis.total_denda,
            "total_denda_display": format_rupiah(kpis.total_denda),
            "rata_durasi": kpis.rata_durasi,
            "rata_durasi_display": format_durasi(kpis.rata_durasi),
        },
        "charts": {
            "tren_bulanan": charts::monthly_trend_by_status(&tren),
            "per_fakultas": charts::loans_per_faculty(&per_fakultas),
            "per_kategori": charts::loans_per_category(&per_kategori),
            "durasi_fakultas": charts::mean_duration_per_faculty(&durasi_fakultas),
        },
        "tables": {
            "per_bulan": per_bulan,
            "per_fakultas": per_fakultas,
            "per_kategori": per_kategori,
            "durasi_fakultas": durasi_fakultas,
        },
        "highlights": highlights,
    })))
}
