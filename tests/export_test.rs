use chrono::NaiveDate;

use seperlima_dashboard::analytics::aggregate::GroupCount;
use seperlima_dashboard::analytics::export::to_csv;
use seperlima_dashboard::models::{BookRow, LoanDetail, LoanStatus};

fn d(s: &str) -> NaiveDate {
    s.parse().expect("test date")
}

fn loan(id: i32, pinjam: &str, kembali: Option<&str>) -> LoanDetail {
    let tgl_pinjam = d(pinjam);
    let tgl_kembali = kembali.map(d);
    LoanDetail {
        id_peminjaman: id,
        tgl_pinjam,
        tgl_kembali,
        durasi_peminjaman: tgl_kembali.map(|k| (k - tgl_pinjam).num_days()),
        denda_buku: 2500,
        status_peminjaman: LoanStatus::from_return_date(tgl_kembali),
        id_anggota: 1,
        no_identitas: "A001".to_string(),
        status_anggota: "Mahasiswa".to_string(),
        nama_anggota: "Anggota, Satu".to_string(), // embedded comma must be quoted
        email: None,
        nama_prodi: Some("Informatika".to_string()),
        jenjang: Some("S1".to_string()),
        nama_fakultas: Some("FSTI".to_string()),
        id_buku: 10,
        judul: "Judul \"Langka\"".to_string(),
        kategori_buku: "Teknologi".to_string(),
        tahun_terbit: Some(2020),
        isbn: None,
        status_buku: "Tersedia".to_string(),
        eksemplar: 2,
        id_petugas: 1,
        nama_petugas: "Petugas".to_string(),
    }
}

#[test]
fn summary_table_round_trips() {
    let table = vec![
        GroupCount {
            key: "Selesai".to_string(),
            jumlah: 2,
        },
        GroupCount {
            key: "Sedang dipinjam".to_string(),
            jumlah: 1,
        },
    ];
    let csv_text = to_csv(&table).expect("serialize");

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let parsed: Vec<GroupCount> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("parse back");
    assert_eq!(parsed, table);
}

#[test]
fn loan_table_round_trips() {
    let rows = vec![
        loan(1, "2024-01-05", None),
        loan(2, "2024-01-20", Some("2024-01-25")),
    ];
    let csv_text = to_csv(&rows).expect("serialize");

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    assert!(headers.iter().any(|h| h == "tgl_pinjam"));
    assert!(headers.iter().any(|h| h == "nama_fakultas"));
    assert!(headers.iter().any(|h| h == "eksemplar"));

    let parsed: Vec<LoanDetail> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("parse back");
    assert_eq!(parsed.len(), rows.len());
    assert_eq!(parsed, rows);
}

#[test]
fn header_row_precedes_one_line_per_record() {
    let rows = vec![loan(1, "2024-01-05", None)];
    let csv_text = to_csv(&rows).expect("serialize");
    let lines: Vec<&str> = csv_text.trim_end().lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("id_peminjaman,"));
}

#[test]
fn book_export_keeps_code_columns_before_copy_count() {
    let rows = vec![BookRow {
        id_buku: 1,
        kode_judul: "J-001".to_string(),
        judul: "Judul".to_string(),
        kode_klasifikasi: "K-100".to_string(),
        kategori_buku: "Teknologi".to_string(),
        kode_pengarang: Some("P-01, P-02".to_string()),
        tahun_terbit: Some(2020),
        isbn: None,
        status_buku: "Tersedia".to_string(),
        eksemplar: 3,
    }];
    let csv_text = to_csv(&rows).expect("serialize");
    let header = csv_text.lines().next().expect("header");
    let kode_judul = header.find("kode_judul").expect("kode_judul");
    let kode_pengarang = header.find("kode_pengarang").expect("kode_pengarang");
    let eksemplar = header.find("eksemplar").expect("eksemplar");
    assert!(kode_judul < eksemplar);
    assert!(kode_pengarang < eksemplar);
}

#[test]
fn empty_table_keeps_its_header_row() {
    let rows: Vec<GroupCount> = Vec::new();
    assert_eq!(to_csv(&rows).expect("serialize"), "key,jumlah\n");
}

#[test]
fn empty_loan_export_keeps_the_column_set() {
    let empty: Vec<LoanDetail> = Vec::new();
    let csv_text = to_csv(&empty).expect("serialize");

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    assert!(headers.iter().any(|h| h == "tgl_pinjam"));
    assert!(headers.iter().any(|h| h == "nama_petugas"));
    assert_eq!(reader.records().count(), 0);

    // The column set must not depend on whether any row matched.
    let populated = to_csv(&[loan(1, "2024-01-05", None)]).expect("serialize");
    assert_eq!(
        csv_text.lines().next().expect("empty header"),
        populated.lines().next().expect("populated header")
    );
}
