//! Chart selection: maps derived summary tables to declarative, renderable
//! chart specs for the external rendering surface.
//!
//! Shared visual policy: axis titles come from semantic column names, the
//! categorical color sequence is fixed, the legend is suppressed whenever
//! the color dimension duplicates the x dimension, and ranked horizontal
//! bars reverse the y axis so the top item renders nearest the top.
//!
//! Every builder returns `None` for an empty summary; the caller substitutes
//! the "no data" placeholder.

use serde::Serialize;
use serde_json::{json, Value};

use super::aggregate::{GroupCount, GroupMean, MonthGroupCount, PairCount, YearCount};

/// Fixed categorical color sequence for charts without an explicit map.
pub const COLOR_SEQUENCE: &[&str] = &[
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
];

/// Fixed faculty color map (ITK faculties).
pub const FAKULTAS_COLORS: &[(&str, &str)] = &[
    ("Fakultas Rekayasa dan Teknologi Industri", "#EF4444"),
    ("Fakultas Pembangunan Berkelanjutan", "#22C55E"),
    ("Fakultas Sains dan Teknologi Informasi", "#3B82F6"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Bar,
    StackedBar,
    HorizontalBar,
    Donut,
    Line,
    Histogram,
    Heatmap,
    Boxplot,
    Treemap,
}

/// A field of the chart data plus its human axis title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub field: String,
    pub title: String,
}

impl Encoding {
    fn new(field: &str, title: &str) -> Self {
        Encoding {
            field: field.to_string(),
            title: title.to_string(),
        }
    }
}

/// Declarative chart object handed to the rendering surface as JSON.
#[derive(Clone, Debug, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Long-form tidy data, one JSON object per row.
    pub data: Vec<Value>,
    pub x: Encoding,
    pub y: Encoding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Encoding>,
    pub color_sequence: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_map: Option<Value>,
    pub show_legend: bool,
    /// Render the first data row nearest the top (ranked horizontal bars).
    pub reverse_y: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbins: Option<u32>,
    /// Hierarchy for treemaps, outermost level first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
}

impl ChartSpec {
    fn new(kind: ChartKind, title: &str, data: Vec<Value>, x: Encoding, y: Encoding) -> Self {
        ChartSpec {
            kind,
            title: title.to_string(),
            data,
            x,
            y,
            color: None,
            color_sequence: COLOR_SEQUENCE,
            color_map: None,
            show_legend: false,
            reverse_y: false,
            hole: None,
            nbins: None,
            path: None,
        }
    }

    fn colored_by(mut self, color: Encoding) -> Self {
        // Legend only when the color dimension adds information over x.
        self.show_legend = color.field != self.x.field;
        self.color = Some(color);
        self
    }

    fn with_fakultas_colors(mut self) -> Self {
        let map: serde_json::Map<String, Value> = FAKULTAS_COLORS
            .iter()
            .map(|(name, hex)| (name.to_string(), json!(hex)))
            .collect();
        self.color_map = Some(Value::Object(map));
        self
    }
}

fn fakultas_color_value(name: &str) -> Value {
    FAKULTAS_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, hex)| json!(hex))
        .unwrap_or(Value::Null)
}

// ==============================
// Summary page charts
// ==============================

/// Stacked bar of loans per month, split by loan status.
pub fn monthly_trend_by_status(cells: &[MonthGroupCount]) -> Option<ChartSpec> {
    if cells.is_empty() {
        return None;
    }
    let data = cells
        .iter()
        .map(|c| json!({ "bulan": c.bulan, "status_peminjaman": c.key, "jumlah": c.jumlah }))
        .collect();
    Some(
        ChartSpec::new(
            ChartKind::StackedBar,
            "Perkembangan peminjaman per bulan berdasarkan status",
            data,
            Encoding::new("bulan", "Bulan"),
            Encoding::new("jumlah", "Jumlah peminjaman"),
        )
        .colored_by(Encoding::new("status_peminjaman", "Status peminjaman")),
    )
}

/// Bar chart of loans per faculty, using the fixed faculty colors.
pub fn loans_per_faculty(per_fakultas: &[GroupCount]) -> Option<ChartSpec> {
    if per_fakultas.is_empty() {
        return None;
    }
    let data = per_fakultas
        .iter()
        .map(|g| json!({ "nama_fakultas": g.key, "jumlah": g.jumlah }))
        .collect();
    Some(
        ChartSpec::new(
            ChartKind::Bar,
            "Peminjaman per fakultas",
            data,
            Encoding::new("nama_fakultas", "Fakultas"),
            Encoding::new("jumlah", "Jumlah peminjaman"),
        )
        .colored_by(Encoding::new("nama_fakultas", "Fakultas"))
        .with_fakultas_colors(),
    )
}

/// Donut chart of loans per book category.
pub fn loans_per_category(per_kategori: &[GroupCount]) -> Option<ChartSpec> {
    if per_kategori.is_empty() {
        return None;
    }
    let data = per_kategori
        .iter()
        .map(|g| json!({ "kategori_buku": g.key, "jumlah": g.jumlah }))
        .collect();
    let mut spec = ChartSpec::new(
        ChartKind::Donut,
        "Peminjaman per kategori buku",
        data,
        Encoding::new("kategori_buku", "Kategori buku"),
        Encoding::new("jumlah", "Jumlah peminjaman"),
    );
    spec.hole = Some(0.4);
    spec.show_legend = true;
    Some(spec)
}

/// Bar chart of mean loan duration per faculty.
pub fn mean_duration_per_faculty(durasi: &[GroupMean]) -> Option<ChartSpec> {
    if durasi.is_empty() {
        return None;
    }
    let data = durasi
        .iter()
        .map(|g| json!({ "nama_fakultas": g.key, "rata_durasi": g.rata }))
        .collect();
    Some(
        ChartSpec::new(
            ChartKind::Bar,
            "Rata-rata durasi peminjaman per fakultas",
            data,
            Encoding::new("nama_fakultas", "Fakultas"),
            Encoding::new("rata_durasi", "Rata-rata durasi (hari)"),
        )
        .colored_by(Encoding::new("nama_fakultas", "Fakultas"))
        .with_fakultas_colors(),
    )
}

// ==============================
// Loans page charts
// ==============================

/// Bar chart of loans per loan status.
pub fn loans_per_status(per_status: &[GroupCount]) -> Option<ChartSpec> {
    if per_status.is_empty() {
        return None;
    }
    let data = per_status
        .iter()
        .map(|g| json!({ "status_peminjaman": g.key, "jumlah": g.jumlah }))
        .collect();
    Some(
        ChartSpec::new(
            ChartKind::Bar,
            "Peminjaman per status peminjaman",
            data,
            Encoding::new("status_peminjaman", "Status peminjaman"),
            Encoding::new("jumlah", "Jumlah peminjaman"),
        )
        .colored_by(Encoding::new("status_peminjaman", "Status peminjaman")),
    )
}

/// Horizontal bar of the most borrowed titles; rank 1 renders on top.
pub fn top_titles(top_judul: &[GroupCount]) -> Option<ChartSpec> {
    if top_judul.is_empty() {
        return None;
    }
    let data = top_judul
        .iter()
        .map(|g| json!({ "judul": g.key, "jumlah": g.jumlah }))
        .collect();
    let mut spec = ChartSpec::new(
        ChartKind::HorizontalBar,
        "Lima judul buku dengan peminjaman tertinggi",
        data,
        Encoding::new("jumlah", "Jumlah peminjaman"),
        Encoding::new("judul", "Judul buku"),
    );
    spec.reverse_y = true;
    Some(spec)
}

/// Histogram of loan durations (days). Null durations are excluded upstream.
pub fn duration_histogram(durations: &[i64]) -> Option<ChartSpec> {
    if durations.is_empty() {
        return None;
    }
    let data = durations
        .iter()
        .map(|d| json!({ "durasi_peminjaman": d }))
        .collect();
    let mut spec = ChartSpec::new(
        ChartKind::Histogram,
        "Distribusi durasi peminjaman",
        data,
        Encoding::new("durasi_peminjaman", "Durasi peminjaman (hari)"),
        Encoding::new("jumlah", "Jumlah peminjaman"),
    );
    spec.nbins = Some(10);
    Some(spec)
}

/// Density heatmap of loans per faculty and book category, long-form.
pub fn faculty_category_heatmap(cells: &[PairCount]) -> Option<ChartSpec> {
    if cells.is_empty() {
        return None;
    }
    let data = cells
        .iter()
        .map(|c| json!({ "nama_fakultas": c.key_a, "kategori_buku": c.key_b, "jumlah": c.jumlah }))
        .collect();
    Some(
        ChartSpec::new(
            ChartKind::Heatmap,
            "Kepadatan peminjaman per fakultas dan kategori buku",
            data,
            Encoding::new("nama_fakultas", "Fakultas"),
            Encoding::new("kategori_buku", "Kategori buku"),
        )
        .colored_by(Encoding::new("jumlah", "Jumlah peminjaman")),
    )
}

/// Boxplot of loan duration per faculty over (faculty, duration) samples.
pub fn duration_boxplot(samples: &[(String, i64)]) -> Option<ChartSpec> {
    if samples.is_empty() {
        return None;
    }
    let data = samples
        .iter()
        .map(|(fakultas, durasi)| {
            json!({ "nama_fakultas": fakultas, "durasi_peminjaman": durasi })
        })
        .collect();
    Some(
        ChartSpec::new(
            ChartKind::Boxplot,
            "Sebaran durasi peminjaman per fakultas",
            data,
            Encoding::new("nama_fakultas", "Fakultas"),
            Encoding::new("durasi_peminjaman", "Durasi peminjaman (hari)"),
        )
        .colored_by(Encoding::new("nama_fakultas", "Fakultas"))
        .with_fakultas_colors(),
    )
}

// ==============================
// Members page charts
// ==============================

/// Bar chart of members per membership status.
pub fn members_per_status(per_status: &[GroupCount]) -> Option<ChartSpec> {
    if per_status.is_empty() {
        return None;
    }
    let data = per_status
        .iter()
        .map(|g| json!({ "status_anggota": g.key, "jumlah": g.jumlah }))
        .collect();
    Some(
        ChartSpec::new(
            ChartKind::Bar,
            "Jumlah anggota per status",
            data,
            Encoding::new("status_anggota", "Status anggota"),
            Encoding::new("jumlah", "Jumlah anggota"),
        )
        .colored_by(Encoding::new("status_anggota", "Status anggota")),
    )
}

/// Bar chart of members per faculty, using the fixed faculty colors.
pub fn members_per_faculty(per_fakultas: &[GroupCount]) -> Option<ChartSpec> {
    if per_fakultas.is_empty() {
        return None;
    }
    let data = per_fakultas
        .iter()
        .map(|g| json!({ "nama_fakultas": g.key, "jumlah": g.jumlah }))
        .collect();
    Some(
        ChartSpec::new(
            ChartKind::Bar,
            "Jumlah anggota per fakultas",
            data,
            Encoding::new("nama_fakultas", "Fakultas"),
            Encoding::new("jumlah", "Jumlah anggota"),
        )
        .colored_by(Encoding::new("nama_fakultas", "Fakultas"))
        .with_fakultas_colors(),
    )
}

/// Treemap of the member base, faculty down to program of study.
pub fn member_treemap(cells: &[PairCount]) -> Option<ChartSpec> {
    if cells.is_empty() {
        return None;
    }
    let data = cells
        .iter()
        .map(|c| {
            json!({
                "nama_fakultas": c.key_a,
                "nama_prodi": c.key_b,
                "jumlah": c.jumlah,
                "color": fakultas_color_value(&c.key_a),
            })
        })
        .collect();
    let mut spec = ChartSpec::new(
        ChartKind::Treemap,
        "Sebaran anggota per fakultas dan program studi",
        data,
        Encoding::new("nama_fakultas", "Fakultas"),
        Encoding::new("jumlah", "Jumlah anggota"),
    );
    spec.path = Some(vec!["nama_fakultas".to_string(), "nama_prodi".to_string()]);
    Some(spec.with_fakultas_colors())
}

// ==============================
// Books page charts
// ==============================

/// Horizontal bar of books per category, largest category on top.
pub fn books_per_category(per_kategori: &[GroupCount]) -> Option<ChartSpec> {
    if per_kategori.is_empty() {
        return None;
    }
    let data = per_kategori
        .iter()
        .map(|g| json!({ "kategori_buku": g.key, "jumlah": g.jumlah }))
        .collect();
    let mut spec = ChartSpec::new(
        ChartKind::HorizontalBar,
        "Jumlah buku per kategori",
        data,
        Encoding::new("jumlah", "Jumlah buku"),
        Encoding::new("kategori_buku", "Kategori buku"),
    );
    spec.reverse_y = true;
    Some(spec)
}

/// Donut chart of the collection status composition.
pub fn books_per_status(per_status: &[GroupCount]) -> Option<ChartSpec> {
    if per_status.is_empty() {
        return None;
    }
    let data = per_status
        .iter()
        .map(|g| json!({ "status_buku": g.key, "jumlah": g.jumlah }))
        .collect();
    let mut spec = ChartSpec::new(
        ChartKind::Donut,
        "Komposisi status koleksi buku",
        data,
        Encoding::new("status_buku", "Status buku"),
        Encoding::new("jumlah", "Jumlah buku"),
    );
    spec.hole = Some(0.4);
    spec.show_legend = true;
    Some(spec)
}

/// Line chart of books per publication year, ascending.
pub fn books_per_year(per_tahun: &[YearCount]) -> Option<ChartSpec> {
    if per_tahun.is_empty() {
        return None;
    }
    let data = per_tahun
        .iter()
        .map(|y| json!({ "tahun_terbit": y.tahun, "jumlah": y.jumlah }))
        .collect();
    Some(ChartSpec::new(
        ChartKind::Line,
        "Jumlah buku per tahun terbit",
        data,
        Encoding::new("tahun_terbit", "Tahun terbit"),
        Encoding::new("jumlah", "Jumlah buku"),
    ))
}
