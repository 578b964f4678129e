//! Data models for the corpus analyzer.
//!
//! This module contains the core data structures shared by the scanner,
//! the aggregator and the report generators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A single entity mention read from a brat `.ann` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation identifier (e.g. `T1`).
    pub id: String,
    /// Entity type, the first token of the tag-info field (e.g. `ADR`).
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Surface text of the mention as it appears in the document.
    pub text: String,
}

impl Annotation {
    /// Key used by the term-frequency table.
    pub fn term_key(&self) -> String {
        self.text.to_lowercase()
    }
}

/// One text document visited by the scanner.
#[derive(Debug, Clone)]
pub struct ScannedDocument {
    /// Path to the text file.
    pub path: PathBuf,
    /// Category label derived from the file name.
    pub category: String,
    /// Whitespace-delimited token count of the document text.
    pub word_count: usize,
    /// Annotations from the sidecar file, empty if it does not exist.
    pub annotations: Vec<Annotation>,
}

/// Frequency tables accumulated over one scan.
///
/// All fields only ever grow while scanning, and every update is a
/// commutative counter increment, so the final tables do not depend on
/// the order in which documents were visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    /// Number of text documents seen.
    pub total_documents: usize,
    /// Number of entity annotations seen across all documents.
    pub total_annotations: usize,
    /// Category label -> number of documents.
    pub category_counts: HashMap<String, usize>,
    /// Annotation type -> number of annotations.
    pub type_counts: HashMap<String, usize>,
    /// Lowercased surface text -> number of annotations.
    pub term_counts: HashMap<String, usize>,
    /// Word count of every document, in scan order.
    pub word_counts: Vec<usize>,
}

impl CorpusStats {
    /// Creates an empty set of tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no documents were scanned.
    pub fn is_empty(&self) -> bool {
        self.total_documents == 0
    }
}

/// A `(key, count)` pair from a frequency table, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: usize,
}

/// A category with its share of the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub documents: usize,
    /// Percentage of all documents, 0.0 for an empty corpus.
    pub percentage: f64,
}

/// Summary of per-document word counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordCountSummary {
    pub documents: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

/// Metadata about a report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Corpus root directory that was scanned.
    pub corpus_root: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Version of the tool that produced the report.
    pub tool_version: String,
    /// Duration of the scan in seconds.
    pub duration_seconds: f64,
    /// Number of terms requested for the top-terms section.
    pub top_terms: usize,
}

/// The complete corpus report, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub total_documents: usize,
    pub total_annotations: usize,
    /// Categories by descending document count.
    pub categories: Vec<CategoryShare>,
    /// Annotation types by descending count.
    pub annotation_types: Vec<RankedEntry>,
    /// Most frequent annotated terms by descending count.
    pub top_terms: Vec<RankedEntry>,
    /// Text length statistics.
    pub text_length: WordCountSummary,
}
