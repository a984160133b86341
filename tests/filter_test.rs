use chrono::NaiveDate;

use seperlima_dashboard::analytics::filter::{
    apply_categories, date_bounds, options, search_contains, LoanFilter, Selection,
};
use seperlima_dashboard::models::{LoanDetail, LoanStatus, MemberRow};

fn d(s: &str) -> NaiveDate {
    s.parse().expect("test date")
}

fn loan(id: i32, pinjam: &str, fakultas: Option<&str>, kategori: &str) -> LoanDetail {
    let tgl_pinjam = d(pinjam);
    LoanDetail {
        id_peminjaman: id,
        tgl_pinjam,
        tgl_kembali: None,
        durasi_peminjaman: None,
        denda_buku: 0,
        status_peminjaman: LoanStatus::from_return_date(None),
        id_anggota: 1,
        no_identitas: "A001".to_string(),
        status_anggota: "Mahasiswa".to_string(),
        nama_anggota: "Anggota Satu".to_string(),
        email: None,
        nama_prodi: None,
        jenjang: None,
        nama_fakultas: fakultas.map(str::to_string),
        id_buku: 10,
        judul: "Judul".to_string(),
        kategori_buku: kategori.to_string(),
        tahun_terbit: None,
        isbn: None,
        status_buku: "Tersedia".to_string(),
        eksemplar: 1,
        id_petugas: 1,
        nama_petugas: "Petugas".to_string(),
    }
}

fn member(id: i32, nama: &str, fakultas: Option<&str>) -> MemberRow {
    MemberRow {
        id_anggota: id,
        no_identitas: format!("A{:03}", id),
        status_anggota: "Mahasiswa".to_string(),
        nama_anggota: nama.to_string(),
        email: None,
        nama_prodi: None,
        jenjang: None,
        nama_fakultas: fakultas.map(str::to_string),
    }
}

fn base() -> Vec<LoanDetail> {
    vec![
        loan(1, "2024-01-05", Some("FSTI"), "Teknologi"),
        loan(2, "2024-01-20", Some("FRTI"), "Sains"),
        loan(3, "2024-02-01", None, "Teknologi"),
        loan(4, "2024-02-10", Some("FSTI"), "Sains"),
    ]
}

fn wildcard(range: (&str, &str)) -> LoanFilter {
    LoanFilter {
        date_range: (d(range.0), d(range.1)),
        categories: vec![
            ("nama_fakultas".to_string(), Selection::All),
            ("kategori_buku".to_string(), Selection::All),
        ],
    }
}

#[test]
fn single_day_range_behaves_like_any_range() {
    let rows = base();
    let single = wildcard(("2024-01-05", "2024-01-05")).apply(&rows);
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].id_peminjaman, 1);

    // A superset range yields a superset of the rows.
    let wider = wildcard(("2024-01-01", "2024-01-31")).apply(&rows);
    assert!(single
        .iter()
        .all(|r| wider.iter().any(|w| w.id_peminjaman == r.id_peminjaman)));
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let rows = base();
    let filtered = wildcard(("2024-01-05", "2024-02-01")).apply(&rows);
    let ids: Vec<i32> = filtered.iter().map(|r| r.id_peminjaman).collect();
    assert_eq!(ids, vec![3, 2, 1]); // sorted by loan date descending
}

#[test]
fn category_filters_compose_with_and() {
    let rows = base();
    let filter = LoanFilter {
        date_range: (d("2024-01-01"), d("2024-12-31")),
        categories: vec![
            (
                "nama_fakultas".to_string(),
                Selection::Is("FSTI".to_string()),
            ),
            (
                "kategori_buku".to_string(),
                Selection::Is("Sains".to_string()),
            ),
        ],
    };
    let filtered = filter.apply(&rows);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id_peminjaman, 4);
}

#[test]
fn wildcard_keeps_rows_with_null_cells() {
    let rows = base();
    let filtered = wildcard(("2024-01-01", "2024-12-31")).apply(&rows);
    // Row 3 has no faculty; the wildcard must not drop it.
    assert_eq!(filtered.len(), 4);
}

#[test]
fn exact_match_never_matches_a_null_cell() {
    let rows = base();
    let filter = LoanFilter {
        date_range: (d("2024-01-01"), d("2024-12-31")),
        categories: vec![(
            "nama_fakultas".to_string(),
            Selection::Is("FSTI".to_string()),
        )],
    };
    let ids: Vec<i32> = filter.apply(&rows).iter().map(|r| r.id_peminjaman).collect();
    assert_eq!(ids, vec![4, 1]);
}

#[test]
fn filtering_to_nothing_is_not_an_error() {
    let rows = base();
    let filter = LoanFilter {
        date_range: (d("2024-01-01"), d("2024-12-31")),
        categories: vec![(
            "nama_fakultas".to_string(),
            Selection::Is("Tidak Ada".to_string()),
        )],
    };
    assert!(filter.apply(&rows).is_empty());
}

#[test]
fn unknown_column_matches_nothing_for_exact_and_everything_for_all() {
    let rows = base();
    let exact = LoanFilter {
        date_range: (d("2024-01-01"), d("2024-12-31")),
        categories: vec![("no_such".to_string(), Selection::Is("x".to_string()))],
    };
    assert!(exact.apply(&rows).is_empty());

    let all = LoanFilter {
        date_range: (d("2024-01-01"), d("2024-12-31")),
        categories: vec![("no_such".to_string(), Selection::All)],
    };
    assert_eq!(all.apply(&rows).len(), 4);
}

#[test]
fn result_is_sorted_by_loan_date_descending_regardless_of_input_order() {
    let mut rows = base();
    rows.reverse();
    let filtered = wildcard(("2024-01-01", "2024-12-31")).apply(&rows);
    let dates: Vec<NaiveDate> = filtered.iter().map(|r| r.tgl_pinjam).collect();
    let mut expected = dates.clone();
    expected.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, expected);
}

#[test]
fn option_lists_come_from_the_unfiltered_base() {
    let rows = base();
    // Sorted distinct non-null values; the null faculty of row 3 is absent.
    assert_eq!(options(&rows, "nama_fakultas"), vec!["FRTI", "FSTI"]);
    assert_eq!(options(&rows, "kategori_buku"), vec!["Sains", "Teknologi"]);
    assert!(options(&rows, "no_such").is_empty());
}

#[test]
fn date_bounds_span_the_base_table() {
    let rows = base();
    assert_eq!(date_bounds(&rows), Some((d("2024-01-05"), d("2024-02-10"))));
    assert_eq!(date_bounds(&[]), None);
}

#[test]
fn selection_from_param() {
    assert_eq!(Selection::from_param(None), Selection::All);
    assert_eq!(Selection::from_param(Some(String::new())), Selection::All);
    assert_eq!(
        Selection::from_param(Some("FSTI".to_string())),
        Selection::Is("FSTI".to_string())
    );
}

#[test]
fn category_filters_apply_without_a_date_dimension() {
    let members = vec![
        member(1, "Andi", Some("FSTI")),
        member(2, "Budi", Some("FRTI")),
        member(3, "Citra", None),
    ];
    let filtered = apply_categories(
        &members,
        &[(
            "nama_fakultas".to_string(),
            Selection::Is("FRTI".to_string()),
        )],
    );
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].nama_anggota, "Budi");
}

#[test]
fn name_search_is_case_insensitive_substring() {
    let members = vec![
        member(1, "Andi Pratama", None),
        member(2, "Budi Santoso", None),
        member(3, "pratiwi", None),
    ];
    let hits = search_contains(&members, |m| m.nama_anggota.as_str(), "PRAT");
    assert_eq!(hits.len(), 2);

    // Empty needle keeps everything.
    assert_eq!(
        search_contains(&members, |m| m.nama_anggota.as_str(), "").len(),
        3
    );
}
