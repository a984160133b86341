use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Categorical;

/// Loan transaction status, derived solely from return-date nullness.
///
/// The store's `peminjaman` table does not carry a status column we trust;
/// a loan with no `tgl_kembali` is outstanding, everything else is done.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    #[serde(rename = "Sedang dipinjam")]
    Outstanding,
    #[serde(rename = "Selesai")]
    Completed,
}

impl LoanStatus {
    pub fn from_return_date(return_date: Option<NaiveDate>) -> Self {
        match return_date {
            None => LoanStatus::Outstanding,
            Some(_) => LoanStatus::Completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Outstanding => "Sedang dipinjam",
            LoanStatus::Completed => "Selesai",
        }
    }
}

/// One row per loan transaction, denormalized across member, program of
/// study, faculty, book, title, classification and staff.
///
/// Inner-join cardinality to member/book/staff: a loan with no matching row
/// there never reaches this struct. Program and faculty are outer-joined, so
/// a member with no declared program still appears with `None` there.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanDetail {
    pub id_peminjaman: i32,
    pub tgl_pinjam: NaiveDate,
    pub tgl_kembali: Option<NaiveDate>,
    /// Loan duration in days; defined only once the book is returned.
    pub durasi_peminjaman: Option<i64>,
    pub denda_buku: i64,
    pub status_peminjaman: LoanStatus,

    pub id_anggota: i32,
    pub no_identitas: String,
    pub status_anggota: String,
    pub nama_anggota: String,
    pub email: Option<String>,

    pub nama_prodi: Option<String>,
    pub jenjang: Option<String>,
    pub nama_fakultas: Option<String>,

    pub id_buku: i32,
    pub judul: String,
    pub kategori_buku: String,
    pub tahun_terbit: Option<i64>,
    pub isbn: Option<String>,
    pub status_buku: String,
    pub eksemplar: i32,

    pub id_petugas: i32,
    pub nama_petugas: String,
}

impl Categorical for LoanDetail {
    fn category(&self, column: &str) -> Option<Option<&str>> {
        match column {
            "nama_fakultas" => Some(self.nama_fakultas.as_deref()),
            "nama_prodi" => Some(self.nama_prodi.as_deref()),
            "jenjang" => Some(self.jenjang.as_deref()),
            "status_anggota" => Some(Some(self.status_anggota.as_str())),
            "status_peminjaman" => Some(Some(self.status_peminjaman.as_str())),
            "kategori_buku" => Some(Some(self.kategori_buku.as_str())),
            "judul" => Some(Some(self.judul.as_str())),
            "status_buku" => Some(Some(self.status_buku.as_str())),
            "nama_petugas" => Some(Some(self.nama_petugas.as_str())),
            _ => None,
        }
    }
}
