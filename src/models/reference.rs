//! Flat reference tables, consumed for display and as join targets.

use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct FacultyRow {
    pub id_fakultas: i32,
    pub nama_fakultas: String,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct ProgramRow {
    pub id_prodi: i32,
    pub nama_prodi: String,
    pub jenjang: String,
    pub id_fakultas: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct AuthorRow {
    pub id_pengarang: i32,
    pub kode_pengarang: String,
    pub nama_pengarang: String,
}

/// Book-author join row, enriched with the title and author name for display.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct BookAuthorRow {
    pub id_buku_pengarang: i32,
    pub id_buku: i32,
    pub id_pengarang: i32,
    pub urutan_pengarang: i32,
    pub judul: String,
    pub nama_pengarang: String,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct StaffRow {
    pub id_petugas: i32,
    pub nama_petugas: String,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct TitleRow {
    pub id_judul: i32,
    pub kode_judul: String,
    pub judul: String,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct ClassificationRow {
    pub id_klasifikasi: i32,
    pub kode_klasifikasi: String,
    pub kategori_buku: String,
}
