//! CSV export of the currently viewed table.
//!
//! Verbatim serialization: header row plus one comma-separated line per
//! record, UTF-8. The export reflects exactly the filtered table the page
//! shows, nothing is re-queried. The header row is always present, so a
//! filter that matches nothing still exports the column set.

use serde::Serialize;

use crate::models::{BookRow, LoanDetail, MemberRow};

use super::aggregate::GroupCount;

/// Column header row of an exportable table, in field declaration order.
///
/// Kept next to the exporter rather than derived from the first record, so
/// an empty table still knows its columns.
pub trait TableSchema {
    const HEADERS: &'static [&'static str];
}

impl TableSchema for LoanDetail {
    const HEADERS: &'static [&'static str] = &[
        "id_peminjaman",
        "tgl_pinjam",
        "tgl_kembali",
        "durasi_peminjaman",
        "denda_buku",
        "status_peminjaman",
        "id_anggota",
        "no_identitas",
        "status_anggota",
        "nama_anggota",
        "email",
        "nama_prodi",
        "jenjang",
        "nama_fakultas",
        "id_buku",
        "judul",
        "kategori_buku",
        "tahun_terbit",
        "isbn",
        "status_buku",
        "eksemplar",
        "id_petugas",
        "nama_petugas",
    ];
}

impl TableSchema for MemberRow {
    const HEADERS: &'static [&'static str] = &[
        "id_anggota",
        "no_identitas",
        "status_anggota",
        "nama_anggota",
        "email",
        "nama_prodi",
        "jenjang",
        "nama_fakultas",
    ];
}

impl TableSchema for BookRow {
    const HEADERS: &'static [&'static str] = &[
        "id_buku",
        "kode_judul",
        "judul",
        "kode_klasifikasi",
        "kategori_buku",
        "kode_pengarang",
        "tahun_terbit",
        "isbn",
        "status_buku",
        "eksemplar",
    ];
}

impl TableSchema for GroupCount {
    const HEADERS: &'static [&'static str] = &["key", "jumlah"];
}

/// Serialize rows to a CSV document: the header row, then one line per
/// record. An empty slice yields a header-only document.
pub fn to_csv<T: Serialize + TableSchema>(rows: &[T]) -> Result<String, csv::Error> {
    // Automatic headers are disabled so the explicit header record below is
    // the only one; serialized rows come out as plain records.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
