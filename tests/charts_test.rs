use seperlima_dashboard::analytics::aggregate::{
    GroupCount, GroupMean, MonthGroupCount, PairCount, YearCount,
};
use seperlima_dashboard::analytics::charts::{self, ChartKind};

fn counts(pairs: &[(&str, u64)]) -> Vec<GroupCount> {
    pairs
        .iter()
        .map(|(key, jumlah)| GroupCount {
            key: key.to_string(),
            jumlah: *jumlah,
        })
        .collect()
}

#[test]
fn empty_summaries_yield_no_chart() {
    assert!(charts::monthly_trend_by_status(&[]).is_none());
    assert!(charts::loans_per_faculty(&[]).is_none());
    assert!(charts::loans_per_category(&[]).is_none());
    assert!(charts::mean_duration_per_faculty(&[]).is_none());
    assert!(charts::loans_per_status(&[]).is_none());
    assert!(charts::top_titles(&[]).is_none());
    assert!(charts::duration_histogram(&[]).is_none());
    assert!(charts::faculty_category_heatmap(&[]).is_none());
    assert!(charts::duration_boxplot(&[]).is_none());
    assert!(charts::members_per_status(&[]).is_none());
    assert!(charts::members_per_faculty(&[]).is_none());
    assert!(charts::member_treemap(&[]).is_none());
    assert!(charts::books_per_category(&[]).is_none());
    assert!(charts::books_per_status(&[]).is_none());
    assert!(charts::books_per_year(&[]).is_none());
}

#[test]
fn legend_is_suppressed_when_color_duplicates_x() {
    let spec = charts::loans_per_faculty(&counts(&[("FSTI", 3)])).expect("chart");
    assert_eq!(spec.kind, ChartKind::Bar);
    let color = spec.color.expect("color encoding");
    assert_eq!(color.field, spec.x.field);
    assert!(!spec.show_legend);
}

#[test]
fn stacked_trend_keeps_its_legend() {
    let cells = vec![MonthGroupCount {
        bulan: "2024-01".to_string(),
        key: "Selesai".to_string(),
        jumlah: 2,
    }];
    let spec = charts::monthly_trend_by_status(&cells).expect("chart");
    assert_eq!(spec.kind, ChartKind::StackedBar);
    assert!(spec.show_legend);
    assert_eq!(spec.x.title, "Bulan");
    assert_eq!(spec.y.title, "Jumlah peminjaman");
}

#[test]
fn top_titles_render_rank_one_on_top() {
    let spec = charts::top_titles(&counts(&[("Alpha", 5), ("Beta", 2)])).expect("chart");
    assert_eq!(spec.kind, ChartKind::HorizontalBar);
    assert!(spec.reverse_y);
    assert_eq!(spec.data.len(), 2);
    assert_eq!(spec.data[0]["judul"], "Alpha");
}

#[test]
fn donut_charts_carry_a_hole() {
    let spec = charts::loans_per_category(&counts(&[("Teknologi", 4)])).expect("chart");
    assert_eq!(spec.kind, ChartKind::Donut);
    assert_eq!(spec.hole, Some(0.4));
    assert!(spec.show_legend);
}

#[test]
fn histogram_bins_are_fixed() {
    let spec = charts::duration_histogram(&[3, 5, 7]).expect("chart");
    assert_eq!(spec.kind, ChartKind::Histogram);
    assert_eq!(spec.nbins, Some(10));
    assert_eq!(spec.data.len(), 3);
}

#[test]
fn heatmap_is_long_form_with_count_color() {
    let cells = vec![PairCount {
        key_a: "FSTI".to_string(),
        key_b: "Teknologi".to_string(),
        jumlah: 7,
    }];
    let spec = charts::faculty_category_heatmap(&cells).expect("chart");
    assert_eq!(spec.kind, ChartKind::Heatmap);
    assert_eq!(spec.color.expect("color").field, "jumlah");
    assert_eq!(spec.data[0]["jumlah"], 7);
}

#[test]
fn treemap_declares_its_hierarchy() {
    let cells = vec![PairCount {
        key_a: "FSTI".to_string(),
        key_b: "Informatika".to_string(),
        jumlah: 12,
    }];
    let spec = charts::member_treemap(&cells).expect("chart");
    assert_eq!(spec.kind, ChartKind::Treemap);
    assert_eq!(
        spec.path,
        Some(vec!["nama_fakultas".to_string(), "nama_prodi".to_string()])
    );
}

#[test]
fn mean_duration_chart_uses_day_axis_title() {
    let durasi = vec![GroupMean {
        key: "FSTI".to_string(),
        rata: 5.5,
    }];
    let spec = charts::mean_duration_per_faculty(&durasi).expect("chart");
    assert_eq!(spec.y.title, "Rata-rata durasi (hari)");
    assert!(spec.color_map.is_some());
}

#[test]
fn year_chart_is_a_line() {
    let per_tahun = vec![
        YearCount {
            tahun: 2019,
            jumlah: 2,
        },
        YearCount {
            tahun: 2021,
            jumlah: 5,
        },
    ];
    let spec = charts::books_per_year(&per_tahun).expect("chart");
    assert_eq!(spec.kind, ChartKind::Line);
    assert_eq!(spec.data[0]["tahun_terbit"], 2019);
}

#[test]
fn chart_kind_serializes_kebab_case() {
    assert_eq!(
        serde_json::to_string(&ChartKind::StackedBar).expect("json"),
        "\"stacked-bar\""
    );
    assert_eq!(
        serde_json::to_string(&ChartKind::HorizontalBar).expect("json"),
        "\"horizontal-bar\""
    );
}
