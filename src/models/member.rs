use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use super::Categorical;

/// One row per library member, outer-joined with program of study and
/// faculty so members with no declared program still appear.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct MemberRow {
    pub id_anggota: i32,
    pub no_identitas: String,
    pub status_anggota: String,
    pub nama_anggota: String,
    pub email: Option<String>,
    pub nama_prodi: Option<String>,
    pub jenjang: Option<String>,
    pub nama_fakultas: Option<String>,
}

impl Categorical for MemberRow {
    fn category(&self, column: &str) -> Option<Option<&str>> {
        match column {
            "status_anggota" => Some(Some(self.status_anggota.as_str())),
            "nama_fakultas" => Some(self.nama_fakultas.as_deref()),
            "nama_prodi" => Some(self.nama_prodi.as_deref()),
            "jenjang" => Some(self.jenjang.as_deref()),
            _ => None,
        }
    }
}
