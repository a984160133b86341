//! Named read queries against the relational store.
//!
//! Each loader issues one raw SQL statement, performing the joins at the
//! store boundary, and returns a tidy typed row vector. Date columns are
//! fetched as strings (DATE_FORMAT) and normalized to `NaiveDate` here;
//! integer aggregates are CAST to SIGNED so the wire type is stable across
//! column-type variants of the schema.

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};

use crate::domain::StoreError;
use crate::models::loan::{LoanDetail, LoanStatus};
use crate::models::reference::{
    AuthorRow, BookAuthorRow, ClassificationRow, FacultyRow, ProgramRow, StaffRow, TitleRow,
};
use crate::models::{BookRow, MemberRow};

/// Parse a store date value. Raw values may carry a time component
/// (`2024-01-05 00:00:00`); comparison granularity is the day.
fn parse_date(raw: &str) -> Result<NaiveDate, StoreError> {
    let day = raw.split_whitespace().next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| StoreError::Malformed(format!("invalid date '{}': {}", raw, e)))
}

fn select_all<T: FromQueryResult>(
    sql: &str,
) -> sea_orm::SelectorRaw<sea_orm::SelectModel<T>> {
    T::find_by_statement(Statement::from_string(DbBackend::MySql, sql.to_owned()))
}

// ==============================
// Loan detail
// ==============================

const LOAN_DETAIL_SQL: &str = r#"
    SELECT
        p.id_peminjaman,
        DATE_FORMAT(p.tgl_pinjam, '%Y-%m-%d') AS tgl_pinjam,
        DATE_FORMAT(p.tgl_kembali, '%Y-%m-%d') AS tgl_kembali,
        CAST(p.durasi_peminjaman AS SIGNED) AS durasi_peminjaman,
        CAST(p.denda_buku AS SIGNED) AS denda_buku,

        a.id_anggota,
        a.no_identitas,
        a.status AS status_anggota,
        a.nama_anggota,
        a.email,

        ps.nama_prodi,
        ps.jenjang,
        f.nama_fakultas,

        b.id_buku,
        j.judul,
        k.kategori_buku,
        CAST(b.tahun_terbit AS SIGNED) AS tahun_terbit,
        b.isbn,
        b.status AS status_buku,
        b.eksemplar,

        pt.id_petugas,
        pt.nama_petugas
    FROM peminjaman p
    JOIN anggota a ON p.id_anggota = a.id_anggota
    LEFT JOIN program_studi ps ON a.id_prodi = ps.id_prodi
    LEFT JOIN fakultas f ON ps.id_fakultas = f.id_fakultas
    JOIN buku b ON p.id_buku = b.id_buku
    JOIN judul j ON b.id_judul = j.id_judul
    JOIN klasifikasi k ON b.id_klasifikasi = k.id_klasifikasi
    JOIN petugas pt ON p.id_petugas = pt.id_petugas
"#;

#[derive(FromQueryResult)]
struct LoanDetailRaw {
    id_peminjaman: i32,
    tgl_pinjam: String,
    tgl_kembali: Option<String>,
    durasi_peminjaman: Option<i64>,
    denda_buku: Option<i64>,
    id_anggota: i32,
    no_identitas: String,
    status_anggota: String,
    nama_anggota: String,
    email: Option<String>,
    nama_prodi: Option<String>,
    jenjang: Option<String>,
    nama_fakultas: Option<String>,
    id_buku: i32,
    judul: String,
    kategori_buku: String,
    tahun_terbit: Option<i64>,
    isbn: Option<String>,
    status_buku: String,
    eksemplar: i32,
    id_petugas: i32,
    nama_petugas: String,
}

impl LoanDetailRaw {
    fn normalize(self) -> Result<LoanDetail, StoreError> {
        let tgl_pinjam = parse_date(&self.tgl_pinjam)?;
        let tgl_kembali = self.tgl_kembali.as_deref().map(parse_date).transpose()?;
        // Status is derived solely from return-date nullness; the store's
        // own status column (where present) is deliberately not consulted.
        let status_peminjaman = LoanStatus::from_return_date(tgl_kembali);

        Ok(LoanDetail {
            id_peminjaman: self.id_peminjaman,
            tgl_pinjam,
            tgl_kembali,
            durasi_peminjaman: self.durasi_peminjaman,
            denda_buku: self.denda_buku.unwrap_or(0),
            status_peminjaman,
            id_anggota: self.id_anggota,
            no_identitas: self.no_identitas,
            status_anggota: self.status_anggota,
            nama_anggota: self.nama_anggota,
            email: self.email,
            nama_prodi: self.nama_prodi,
            jenjang: self.jenjang,
            nama_fakultas: self.nama_fakultas,
            id_buku: self.id_buku,
            judul: self.judul,
            kategori_buku: self.kategori_buku,
            tahun_terbit: self.tahun_terbit,
            isbn: self.isbn,
            status_buku: self.status_buku,
            eksemplar: self.eksemplar,
            id_petugas: self.id_petugas,
            nama_petugas: self.nama_petugas,
        })
    }
}

/// One row per loan transaction, denormalized across members, programs,
/// faculties, books, titles, classifications and staff.
pub async fn load_loan_details(db: &DatabaseConnection) -> Result<Vec<LoanDetail>, StoreError> {
    let raw = select_all::<LoanDetailRaw>(LOAN_DETAIL_SQL).all(db).await?;
    raw.into_iter().map(LoanDetailRaw::normalize).collect()
}

// ==============================
// Members and books
// ==============================

const MEMBER_SQL: &str = r#"
    SELECT
        a.id_anggota,
        a.no_identitas,
        a.status AS status_anggota,
        a.nama_anggota,
        a.email,
        ps.nama_prodi,
        ps.jenjang,
        f.nama_fakultas
    FROM anggota a
    LEFT JOIN program_studi ps ON a.id_prodi = ps.id_prodi
    LEFT JOIN fakultas f ON ps.id_fakultas = f.id_fakultas
"#;

pub async fn load_members(db: &DatabaseConnection) -> Result<Vec<MemberRow>, StoreError> {
    Ok(select_all::<MemberRow>(MEMBER_SQL).all(db).await?)
}

// One row per book even with multiple authors: author codes are
// concatenated in the explicit per-book author order.
const BOOK_SQL: &str = r#"
    SELECT
        b.id_buku,
        j.kode_judul,
        j.judul,
        k.kode_klasifikasi,
        k.kategori_buku,
        GROUP_CONCAT(pg.kode_pengarang
                     ORDER BY bp.urutan_pengarang
                     SEPARATOR ', ') AS kode_pengarang,
        CAST(b.tahun_terbit AS SIGNED) AS tahun_terbit,
        b.isbn,
        b.status AS status_buku,
        b.eksemplar
    FROM buku b
    JOIN judul j ON b.id_judul = j.id_judul
    JOIN klasifikasi k ON b.id_klasifikasi = k.id_klasifikasi
    LEFT JOIN buku_pengarang bp ON b.id_buku = bp.id_buku
    LEFT JOIN pengarang pg ON bp.id_pengarang = pg.id_pengarang
    GROUP BY
        b.id_buku,
        j.kode_judul,
        j.judul,
        k.kode_klasifikasi,
        k.kategori_buku,
        b.tahun_terbit,
        b.isbn,
        b.status,
        b.eksemplar
    ORDER BY b.id_buku
"#;

pub async fn load_books(db: &DatabaseConnection) -> Result<Vec<BookRow>, StoreError> {
    Ok(select_all::<BookRow>(BOOK_SQL).all(db).await?)
}

// ==============================
// Reference tables
// ==============================

pub async fn load_faculties(db: &DatabaseConnection) -> Result<Vec<FacultyRow>, StoreError> {
    Ok(
        select_all::<FacultyRow>("SELECT id_fakultas, nama_fakultas FROM fakultas")
            .all(db)
            .await?,
    )
}

pub async fn load_programs(db: &DatabaseConnection) -> Result<Vec<ProgramRow>, StoreError> {
    Ok(select_all::<ProgramRow>(
        "SELECT id_prodi, nama_prodi, jenjang, id_fakultas FROM program_studi",
    )
    .all(db)
    .await?)
}

pub async fn load_authors(db: &DatabaseConnection) -> Result<Vec<AuthorRow>, StoreError> {
    Ok(select_all::<AuthorRow>(
        "SELECT id_pengarang, kode_pengarang, nama_pengarang FROM pengarang",
    )
    .all(db)
    .await?)
}

const BOOK_AUTHOR_SQL: &str = r#"
    SELECT
        bp.id_buku_pengarang,
        bp.id_buku,
        bp.id_pengarang,
        bp.urutan_pengarang,
        j.judul,
        pg.nama_pengarang
    FROM buku_pengarang bp
    JOIN buku b ON bp.id_buku = b.id_buku
    JOIN judul j ON b.id_judul = j.id_judul
    JOIN pengarang pg ON bp.id_pengarang = pg.id_pengarang
"#;

pub async fn load_book_authors(db: &DatabaseConnection) -> Result<Vec<BookAuthorRow>, StoreError> {
    Ok(select_all::<BookAuthorRow>(BOOK_AUTHOR_SQL).all(db).await?)
}

pub async fn load_staff(db: &DatabaseConnection) -> Result<Vec<StaffRow>, StoreError> {
    Ok(
        select_all::<StaffRow>("SELECT id_petugas, nama_petugas FROM petugas")
            .all(db)
            .await?,
    )
}

pub async fn load_titles(db: &DatabaseConnection) -> Result<Vec<TitleRow>, StoreError> {
    Ok(
        select_all::<TitleRow>("SELECT id_judul, kode_judul, judul FROM judul")
            .all(db)
            .await?,
    )
}

pub async fn load_classifications(
    db: &DatabaseConnection,
) -> Result<Vec<ClassificationRow>, StoreError> {
    Ok(select_all::<ClassificationRow>(
        "SELECT id_klasifikasi, kode_klasifikasi, kategori_buku FROM klasifikasi",
    )
    .all(db)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::parse_date;
    use chrono::NaiveDate;

    #[test]
    fn parses_plain_dates() {
        assert_eq!(
            parse_date("2024-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn parses_dates_with_time_component() {
        assert_eq!(
            parse_date("2024-01-05 13:45:00").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_date("05/01/2024").is_err());
        assert!(parse_date("").is_err());
    }
}
