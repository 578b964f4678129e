//! Frequency aggregation and ranking.
//!
//! This module folds scanned documents into [`CorpusStats`] and turns the
//! resulting frequency tables into sorted views for the reports.

use crate::models::{
    Annotation, CategoryShare, CorpusStats, RankedEntry, ScannedDocument, WordCountSummary,
};
use std::collections::HashMap;

/// Fold one scanned document into the statistics.
pub fn record_document(stats: &mut CorpusStats, document: &ScannedDocument) {
    stats.total_documents += 1;
    *stats
        .category_counts
        .entry(document.category.clone())
        .or_insert(0) += 1;
    stats.word_counts.push(document.word_count);

    for annotation in &document.annotations {
        record_annotation(stats, annotation);
    }
}

/// Fold one annotation into the type and term tables.
pub fn record_annotation(stats: &mut CorpusStats, annotation: &Annotation) {
    stats.total_annotations += 1;
    *stats
        .type_counts
        .entry(annotation.entity_type.clone())
        .or_insert(0) += 1;
    *stats.term_counts.entry(annotation.term_key()).or_insert(0) += 1;
}

/// Sort a frequency table by descending count.
///
/// Ties are ordered by key so that output does not depend on hash order.
pub fn rank(table: &HashMap<String, usize>) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = table
        .iter()
        .map(|(key, count)| RankedEntry {
            key: key.clone(),
            count: *count,
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    entries
}

/// The `n` most frequent entries of a table.
pub fn top_n(table: &HashMap<String, usize>, n: usize) -> Vec<RankedEntry> {
    let mut ranked = rank(table);
    ranked.truncate(n);
    ranked
}

/// Percentage of `count` in `total`, 0.0 when `total` is zero.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Categories by descending document count, with their corpus share.
pub fn category_distribution(stats: &CorpusStats) -> Vec<CategoryShare> {
    rank(&stats.category_counts)
        .into_iter()
        .map(|entry| CategoryShare {
            percentage: percentage(entry.count, stats.total_documents),
            category: entry.key,
            documents: entry.count,
        })
        .collect()
}

/// Summarize per-document word counts.
pub fn word_count_summary(word_counts: &[usize]) -> WordCountSummary {
    if word_counts.is_empty() {
        return WordCountSummary::default();
    }

    let total: usize = word_counts.iter().sum();
    WordCountSummary {
        documents: word_counts.len(),
        min: word_counts.iter().copied().min().unwrap_or(0),
        max: word_counts.iter().copied().max().unwrap_or(0),
        mean: total as f64 / word_counts.len() as f64,
    }
}

/// Histogram bins over word counts as `(lower_bound, upper_bound, count)`.
///
/// Bins are equal width and cover `[min, max]`; the last bin is closed.
pub fn histogram(values: &[usize], bins: usize) -> Vec<(usize, usize, usize)> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().min().unwrap_or(0);
    let max = values.iter().copied().max().unwrap_or(0);
    let span = max - min + 1;
    let bins = bins.min(span);
    let width = (span + bins - 1) / bins;
    // A rounded-up width needs fewer bins to reach `max`.
    let bins = (span + width - 1) / width;

    let mut counts = vec![0usize; bins];
    for &value in values {
        let idx = ((value - min) / width).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = min + i * width;
            let upper = if i + 1 == bins { max } else { lower + width - 1 };
            (lower, upper, count)
        })
        .collect()
}
