//! Scalar KPI values for the summary cards, plus their display formatting.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::LoanDetail;

/// KPI card values over a (possibly filtered) loan table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoanKpis {
    /// Number of loan transactions.
    pub total_peminjaman: usize,
    /// Distinct members that ever borrowed in the slice.
    pub anggota_aktif: usize,
    /// Distinct books borrowed in the slice.
    pub buku_dipinjam: usize,
    /// Sum of fines, in rupiah.
    pub total_denda: i64,
    /// Mean loan duration in days over completed loans; `None` when the
    /// slice has no completed loan.
    pub rata_durasi: Option<f64>,
}

pub fn loan_kpis(rows: &[LoanDetail]) -> LoanKpis {
    let anggota: HashSet<i32> = rows.iter().map(|r| r.id_anggota).collect();
    let buku: HashSet<i32> = rows.iter().map(|r| r.id_buku).collect();
    let total_denda = rows.iter().map(|r| r.denda_buku).sum();

    let durations: Vec<i64> = rows.iter().filter_map(|r| r.durasi_peminjaman).collect();
    let rata_durasi = if durations.is_empty() {
        None
    } else {
        Some(durations.iter().sum::<i64>() as f64 / durations.len() as f64)
    };

    LoanKpis {
        total_peminjaman: rows.len(),
        anggota_aktif: anggota.len(),
        buku_dipinjam: buku.len(),
        total_denda,
        rata_durasi,
    }
}

/// Currency display: `Rp` prefix with thousands separators, e.g. `Rp 1,250,000`.
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Duration display: one decimal place with the day unit, or `-` when the
/// value is undefined.
pub fn format_durasi(days: Option<f64>) -> String {
    match days {
        Some(d) => format!("{:.1} hari", d),
        None => "-".to_string(),
    }
}
