//! Text and JSON report generation.
//!
//! This module turns [`CorpusStats`] into a [`Report`] and renders it as the
//! plain-text console summary or as pretty-printed JSON.

use crate::analysis::{category_distribution, rank, top_n, word_count_summary};
use crate::models::{CategoryShare, CorpusStats, RankedEntry, Report, ReportMetadata};
use anyhow::Result;

/// Options controlling the text report.
#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    /// Append `(xx.x%)` to each category line.
    pub show_percentages: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            show_percentages: true,
        }
    }
}

/// Build the report from the scanned statistics.
pub fn build_report(stats: &CorpusStats, metadata: ReportMetadata) -> Report {
    let top_terms = top_n(&stats.term_counts, metadata.top_terms);

    Report {
        metadata,
        total_documents: stats.total_documents,
        total_annotations: stats.total_annotations,
        categories: category_distribution(stats),
        annotation_types: rank(&stats.type_counts),
        top_terms,
        text_length: word_count_summary(&stats.word_counts),
    }
}

/// Generate the plain-text console report.
pub fn generate_text_report(report: &Report, options: TextOptions) -> String {
    let mut output = String::new();

    output.push_str("=== CADEC Dataset Analysis ===\n");

    output.push_str(&format!(
        "\nTotal number of documents: {}\n",
        report.total_documents
    ));
    output.push_str(&format!(
        "Total number of annotations: {}\n",
        report.total_annotations
    ));

    output.push_str(&generate_category_section(&report.categories, options));
    output.push_str(&generate_types_section(&report.annotation_types));
    output.push_str(&generate_terms_section(&report.top_terms, report.metadata.top_terms));

    output
}

/// Generate the category distribution section.
fn generate_category_section(categories: &[CategoryShare], options: TextOptions) -> String {
    let mut section = String::from("\nDrug distribution:\n");

    for share in categories {
        if options.show_percentages {
            section.push_str(&format!(
                "{}: {} documents ({:.1}%)\n",
                share.category, share.documents, share.percentage
            ));
        } else {
            section.push_str(&format!("{}: {} documents\n", share.category, share.documents));
        }
    }

    section
}

fn generate_types_section(types: &[RankedEntry]) -> String {
    let mut section = String::from("\nAnnotation types distribution:\n");
    for entry in types {
        section.push_str(&format!("{}: {}\n", entry.key, entry.count));
    }
    section
}

fn generate_terms_section(terms: &[RankedEntry], limit: usize) -> String {
    let mut section = format!("\nTop {} most common annotated terms:\n", limit);
    for entry in terms {
        section.push_str(&format!("{}: {}\n", entry.key, entry.count));
    }
    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
