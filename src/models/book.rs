use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use super::Categorical;

/// One row per book copy, joined with its title and classification.
///
/// `kode_pengarang` carries every author code of the book, concatenated in
/// the explicit per-book author order into one display string.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct BookRow {
    pub id_buku: i32,
    pub kode_judul: String,
    pub judul: String,
    pub kode_klasifikasi: String,
    pub kategori_buku: String,
    pub kode_pengarang: Option<String>,
    pub tahun_terbit: Option<i64>,
    pub isbn: Option<String>,
    pub status_buku: String,
    pub eksemplar: i32,
}

impl Categorical for BookRow {
    fn category(&self, column: &str) -> Option<Option<&str>> {
        match column {
            "kategori_buku" => Some(Some(self.kategori_buku.as_str())),
            "status_buku" => Some(Some(self.status_buku.as_str())),
            "judul" => Some(Some(self.judul.as_str())),
            _ => None,
        }
    }
}
