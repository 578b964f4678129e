//! SVG chart rendering.
//!
//! Charts are built as self-contained SVG documents from the already
//! aggregated [`CorpusStats`]; nothing here reads the corpus again.

use crate::analysis::{category_distribution, histogram, rank, top_n};
use crate::models::CorpusStats;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output file for the annotation type bar chart.
pub const ANNOTATION_TYPES_CHART: &str = "annotation_types.svg";
/// Output file for the category distribution chart.
pub const CATEGORY_CHART: &str = "drug_distribution.svg";
/// Output file for the top terms chart.
pub const TOP_TERMS_CHART: &str = "top_terms.svg";
/// Output file for the text length histogram.
pub const TEXT_LENGTH_CHART: &str = "text_length_distribution.svg";

const WIDTH: f64 = 900.0;
const BAR_COLOR: &str = "#4c72b0";
const ROW_HEIGHT: f64 = 22.0;

/// Options for chart rendering.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Directory the chart files are written to.
    pub output_dir: PathBuf,
    /// Number of terms in the top terms chart.
    pub top_terms: usize,
    /// Number of bins in the text length histogram.
    pub histogram_bins: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            top_terms: 20,
            histogram_bins: 20,
        }
    }
}

/// Render all four charts, overwriting existing files.
///
/// Returns the paths that were written.
pub fn render_charts(stats: &CorpusStats, options: &ChartOptions) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "Failed to create chart directory: {}",
            options.output_dir.display()
        )
    })?;

    let charts = [
        (ANNOTATION_TYPES_CHART, annotation_types_chart(stats)),
        (CATEGORY_CHART, category_chart(stats)),
        (TOP_TERMS_CHART, top_terms_chart(stats, options.top_terms)),
        (
            TEXT_LENGTH_CHART,
            text_length_chart(stats, options.histogram_bins),
        ),
    ];

    let mut written = Vec::with_capacity(charts.len());
    for (name, svg) in charts {
        let path = options.output_dir.join(name);
        write_chart(&path, &svg)?;
        written.push(path);
    }

    info!("Wrote {} charts to {}", written.len(), options.output_dir.display());
    Ok(written)
}

fn write_chart(path: &Path, svg: &str) -> Result<()> {
    std::fs::write(path, svg)
        .with_context(|| format!("Failed to write chart: {}", path.display()))
}

/// Vertical bar chart of annotation type frequencies.
pub fn annotation_types_chart(stats: &CorpusStats) -> String {
    let bars: Vec<(String, usize)> = rank(&stats.type_counts)
        .into_iter()
        .map(|e| (e.key, e.count))
        .collect();

    vertical_bar_chart("Distribution of Annotation Types", "Annotation Type", "Count", &bars)
}

/// Horizontal bar chart of documents per category, labelled with percentages.
pub fn category_chart(stats: &CorpusStats) -> String {
    let rows: Vec<(String, usize, String)> = category_distribution(stats)
        .into_iter()
        .map(|share| {
            let label = format!("{} ({:.1}%)", share.documents, share.percentage);
            (share.category, share.documents, label)
        })
        .collect();

    horizontal_bar_chart("Distribution of Documents by Drug", "Number of Documents", &rows)
}

/// Horizontal bar chart of the most frequent annotated terms.
pub fn top_terms_chart(stats: &CorpusStats, n: usize) -> String {
    let rows: Vec<(String, usize, String)> = top_n(&stats.term_counts, n)
        .into_iter()
        .map(|e| (e.key, e.count, e.count.to_string()))
        .collect();

    horizontal_bar_chart(
        &format!("Top {} Most Common Annotated Terms", n),
        "Frequency",
        &rows,
    )
}

/// Histogram of per-document word counts.
pub fn text_length_chart(stats: &CorpusStats, bins: usize) -> String {
    let bars: Vec<(String, usize)> = histogram(&stats.word_counts, bins)
        .into_iter()
        .map(|(lower, upper, count)| {
            let label = if lower == upper {
                lower.to_string()
            } else {
                format!("{}-{}", lower, upper)
            };
            (label, count)
        })
        .collect();

    vertical_bar_chart(
        "Distribution of Text Lengths",
        "Number of Words",
        "Number of Documents",
        &bars,
    )
}

fn vertical_bar_chart(title: &str, x_label: &str, y_label: &str, bars: &[(String, usize)]) -> String {
    let height = 520.0;
    let (left, right, top, bottom) = (70.0, 20.0, 50.0, 130.0);
    let plot_w = WIDTH - left - right;
    let plot_h = height - top - bottom;

    let mut svg = svg_header(WIDTH, height, title);

    if bars.is_empty() {
        svg.push_str(&no_data(WIDTH, height));
        svg.push_str("</svg>\n");
        return svg;
    }

    let max = bars.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1) as f64;
    let slot = plot_w / bars.len() as f64;
    let bar_w = slot * 0.8;

    // Axes
    let _ = writeln!(
        svg,
        r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/><line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/>"#,
        l = left,
        t = top,
        b = top + plot_h,
        r = left + plot_w
    );

    for i in 0..=4 {
        let value = max * i as f64 / 4.0;
        let y = top + plot_h - plot_h * i as f64 / 4.0;
        let _ = writeln!(
            svg,
            r#"<text x="{x:.1}" y="{y:.1}" font-size="11" text-anchor="end">{v:.0}</text>"#,
            x = left - 6.0,
            y = y + 4.0,
            v = value
        );
    }

    for (i, (label, value)) in bars.iter().enumerate() {
        let bar_h = plot_h * *value as f64 / max;
        let x = left + slot * i as f64 + (slot - bar_w) / 2.0;
        let y = top + plot_h - bar_h;
        let cx = x + bar_w / 2.0;
        let ly = top + plot_h + 14.0;

        let _ = writeln!(
            svg,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{c}"><title>{t}: {v}</title></rect>"#,
            w = bar_w,
            h = bar_h,
            c = BAR_COLOR,
            t = escape(label),
            v = value
        );
        let _ = writeln!(
            svg,
            r#"<text x="{cx:.1}" y="{ly:.1}" font-size="11" text-anchor="end" transform="rotate(-45 {cx:.1} {ly:.1})">{t}</text>"#,
            t = escape(label)
        );
    }

    let _ = writeln!(
        svg,
        r#"<text x="{x:.1}" y="{y:.1}" font-size="13" text-anchor="middle">{t}</text>"#,
        x = left + plot_w / 2.0,
        y = height - 10.0,
        t = escape(x_label)
    );
    let _ = writeln!(
        svg,
        r#"<text x="18" y="{y:.1}" font-size="13" text-anchor="middle" transform="rotate(-90 18 {y:.1})">{t}</text>"#,
        y = top + plot_h / 2.0,
        t = escape(y_label)
    );

    svg.push_str("</svg>\n");
    svg
}

fn horizontal_bar_chart(title: &str, x_label: &str, rows: &[(String, usize, String)]) -> String {
    let (left, right, top, bottom) = (220.0, 110.0, 50.0, 50.0);
    let height = top + bottom + ROW_HEIGHT * rows.len().max(1) as f64;
    let plot_w = WIDTH - left - right;

    let mut svg = svg_header(WIDTH, height, title);

    if rows.is_empty() {
        svg.push_str(&no_data(WIDTH, height));
        svg.push_str("</svg>\n");
        return svg;
    }

    let max = rows.iter().map(|(_, v, _)| *v).max().unwrap_or(0).max(1) as f64;

    let _ = writeln!(
        svg,
        r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/>"#,
        l = left,
        t = top,
        b = top + ROW_HEIGHT * rows.len() as f64
    );

    for (i, (name, value, label)) in rows.iter().enumerate() {
        let y = top + ROW_HEIGHT * i as f64;
        let bar_w = plot_w * *value as f64 / max;
        let text_y = y + ROW_HEIGHT * 0.65;

        let _ = writeln!(
            svg,
            r#"<text x="{x:.1}" y="{ty:.1}" font-size="12" text-anchor="end">{n}</text>"#,
            x = left - 6.0,
            ty = text_y,
            n = escape(name)
        );
        let _ = writeln!(
            svg,
            r#"<rect x="{l}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{c}"/>"#,
            l = left,
            y = y + 3.0,
            w = bar_w,
            h = ROW_HEIGHT - 6.0,
            c = BAR_COLOR
        );
        let _ = writeln!(
            svg,
            r#"<text x="{x:.1}" y="{ty:.1}" font-size="11">{t}</text>"#,
            x = left + bar_w + 4.0,
            ty = text_y,
            t = escape(label)
        );
    }

    let _ = writeln!(
        svg,
        r#"<text x="{x:.1}" y="{y:.1}" font-size="13" text-anchor="middle">{t}</text>"#,
        x = left + plot_w / 2.0,
        y = height - 15.0,
        t = escape(x_label)
    );

    svg.push_str("</svg>\n");
    svg
}

fn svg_header(width: f64, height: f64, title: &str) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = width,
        h = height
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{x:.1}" y="28" font-size="16" font-weight="bold" text-anchor="middle">{t}</text>"#,
        x = width / 2.0,
        t = escape(title)
    );
    svg
}

fn no_data(width: f64, height: f64) -> String {
    format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"14\" text-anchor=\"middle\" fill=\"gray\">No data</text>\n",
        width / 2.0,
        height / 2.0
    )
}

/// Escape text for use inside SVG markup.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::record_document;
    use crate::models::{Annotation, ScannedDocument};
    use tempfile::TempDir;

    fn sample_stats() -> CorpusStats {
        let mut stats = CorpusStats::new();
        for (category, words, entity_type, text) in [
            ("LIPITOR", 40, "ADR", "muscle pain"),
            ("LIPITOR", 120, "ADR", "Muscle Pain"),
            ("VOLTAREN", 75, "Drug", "voltaren & co"),
        ] {
            record_document(
                &mut stats,
                &ScannedDocument {
                    path: PathBuf::from(format!("{}.txt", category)),
                    category: category.to_string(),
                    word_count: words,
                    annotations: vec![Annotation {
                        id: "T1".to_string(),
                        entity_type: entity_type.to_string(),
                        text: text.to_string(),
                    }],
                },
            );
        }
        stats
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    }

    #[test]
    fn test_annotation_types_chart() {
        let svg = annotation_types_chart(&sample_stats());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Distribution of Annotation Types"));
        assert!(svg.contains(">ADR<"));
        assert_eq!(svg.matches("<rect x=").count(), 2);
    }

    #[test]
    fn test_category_chart_has_percentages() {
        let svg = category_chart(&sample_stats());
        assert!(svg.contains("2 (66.7%)"));
        assert!(svg.contains("1 (33.3%)"));
    }

    #[test]
    fn test_top_terms_chart_escapes_labels() {
        let svg = top_terms_chart(&sample_stats(), 20);
        assert!(svg.contains("Top 20 Most Common Annotated Terms"));
        assert!(svg.contains("voltaren &amp; co"));
        assert!(svg.contains(">muscle pain<"));
    }

    #[test]
    fn test_text_length_chart() {
        let svg = text_length_chart(&sample_stats(), 4);
        assert!(svg.contains("Distribution of Text Lengths"));
        assert_eq!(svg.matches("<rect x=").count(), 4);
    }

    #[test]
    fn test_empty_stats_render_no_data() {
        let stats = CorpusStats::new();
        for svg in [
            annotation_types_chart(&stats),
            category_chart(&stats),
            top_terms_chart(&stats, 20),
            text_length_chart(&stats, 20),
        ] {
            assert!(svg.contains("No data"));
            assert!(!svg.contains("NaN"));
        }
    }

    #[test]
    fn test_render_charts_writes_files() {
        let temp_dir = TempDir::new().unwrap();
        let options = ChartOptions {
            output_dir: temp_dir.path().join("charts"),
            ..ChartOptions::default()
        };

        let written = render_charts(&sample_stats(), &options).unwrap();

        assert_eq!(written.len(), 4);
        for name in [
            ANNOTATION_TYPES_CHART,
            CATEGORY_CHART,
            TOP_TERMS_CHART,
            TEXT_LENGTH_CHART,
        ] {
            assert!(options.output_dir.join(name).is_file());
        }
    }

    #[test]
    fn test_render_charts_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let options = ChartOptions {
            output_dir: temp_dir.path().to_path_buf(),
            ..ChartOptions::default()
        };
        std::fs::write(temp_dir.path().join(TOP_TERMS_CHART), "stale").unwrap();

        render_charts(&sample_stats(), &options).unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join(TOP_TERMS_CHART)).unwrap();
        assert!(content.starts_with("<svg"));
    }
}
