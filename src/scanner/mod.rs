//! Corpus scanner for discovering documents and their annotations.
//!
//! This module walks the text directory of a corpus, pairs every text file
//! with its sidecar annotation file and folds the result into a
//! [`CorpusStats`] value.

pub mod annotation;

use crate::analysis::record_document;
use crate::models::{CorpusStats, ScannedDocument};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use annotation::read_annotation_file;

/// Configuration for corpus scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Subdirectory holding the text documents.
    pub text_dir: String,
    /// Subdirectory holding the annotation files.
    pub annotation_dir: String,
    /// Extension of text documents (without dot).
    pub text_extension: String,
    /// Extension of annotation files (without dot).
    pub annotation_extension: String,
    /// Show a progress bar while scanning.
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            text_dir: "text".to_string(),
            annotation_dir: "original".to_string(),
            text_extension: "txt".to_string(),
            annotation_extension: "ann".to_string(),
            show_progress: false,
        }
    }
}

impl From<&crate::config::ScannerConfig> for ScanConfig {
    fn from(config: &crate::config::ScannerConfig) -> Self {
        Self {
            text_dir: config.text_dir.clone(),
            annotation_dir: config.annotation_dir.clone(),
            text_extension: config.text_extension.clone(),
            annotation_extension: config.annotation_extension.clone(),
            show_progress: false,
        }
    }
}

/// Derive a document's category from its file name.
///
/// The category is everything before the first `.`, so
/// `LIPITOR.12.txt` belongs to `LIPITOR`. A name without a dot is its own
/// category.
pub fn category_from_file_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Count whitespace-delimited tokens in a document.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Scanner over one corpus root.
pub struct CorpusScanner {
    config: ScanConfig,
    root: PathBuf,
}

impl CorpusScanner {
    /// Create a new corpus scanner.
    pub fn new(root: PathBuf, config: ScanConfig) -> Self {
        Self { config, root }
    }

    /// Directory containing the text documents.
    pub fn text_dir(&self) -> PathBuf {
        self.root.join(&self.config.text_dir)
    }

    /// Directory containing the annotation files.
    pub fn annotation_dir(&self) -> PathBuf {
        self.root.join(&self.config.annotation_dir)
    }

    /// Expected annotation path for a text document.
    pub fn annotation_path_for(&self, text_path: &Path) -> Option<PathBuf> {
        let file_name = text_path.file_name()?;
        let ann_name = Path::new(file_name).with_extension(&self.config.annotation_extension);
        Some(self.annotation_dir().join(ann_name))
    }

    /// List every text document, sorted by file name.
    pub fn list_text_files(&self) -> Result<Vec<PathBuf>> {
        let text_dir = self.text_dir();

        if !text_dir.is_dir() {
            anyhow::bail!("Text directory not found: {}", text_dir.display());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&text_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry
                .with_context(|| format!("Failed to list {}", text_dir.display()))?;
            let path = entry.path();

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            // `Path::is_file` follows symlinks, the walker's file type does not.
            if ext == self.config.text_extension && path.is_file() {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Read one document and its annotations.
    pub fn scan_document(&self, text_path: &Path) -> Result<ScannedDocument> {
        let file_name = text_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let category = category_from_file_name(&file_name).to_string();

        let text = std::fs::read_to_string(text_path)
            .with_context(|| format!("Failed to read text file: {}", text_path.display()))?;

        let annotations = match self.annotation_path_for(text_path) {
            Some(ann_path) if ann_path.is_file() => read_annotation_file(&ann_path)?,
            Some(ann_path) => {
                debug!("No annotation file for {}: {}", file_name, ann_path.display());
                Vec::new()
            }
            None => Vec::new(),
        };

        Ok(ScannedDocument {
            path: text_path.to_path_buf(),
            category,
            word_count: count_words(&text),
            annotations,
        })
    }

    /// Scan the whole corpus and return the aggregated statistics.
    pub fn scan(&self) -> Result<CorpusStats> {
        let files = self.list_text_files()?;
        info!(
            "Found {} text files in {}",
            files.len(),
            self.text_dir().display()
        );

        if !self.annotation_dir().is_dir() {
            warn!(
                "Annotation directory not found: {} (documents will have no annotations)",
                self.annotation_dir().display()
            );
        }

        let progress_bar = if self.config.show_progress {
            Some(scan_progress_bar(files.len() as u64))
        } else {
            None
        };

        let mut stats = CorpusStats::new();
        for path in &files {
            let document = self.scan_document(path)?;
            debug!(
                "{}: {} annotations, {} words",
                document.path.display(),
                document.annotations.len(),
                document.word_count
            );
            record_document(&mut stats, &document);

            if let Some(ref pb) = progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        info!(
            "Scanned {} documents with {} annotations",
            stats.total_documents, stats.total_annotations
        );

        Ok(stats)
    }
}

fn scan_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}
