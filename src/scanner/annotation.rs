//! Parser for brat standoff annotation files.
//!
//! Only entity-mention lines (those starting with `T`) are read. Relation,
//! event, attribute and note lines are ignored, as is any entity line that
//! does not have the expected three tab-separated fields.

use crate::models::Annotation;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// First character of an entity-mention line.
pub const ENTITY_MARKER: char = 'T';

/// Errors raised while reading an annotation file.
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Failed to read annotation file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and parse an annotation file.
pub fn read_annotation_file(path: &Path) -> Result<Vec<Annotation>, AnnotationError> {
    let content = std::fs::read_to_string(path).map_err(|source| AnnotationError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_annotations(&content))
}

/// Parse annotation file content into entity records.
pub fn parse_annotations(content: &str) -> Vec<Annotation> {
    content.lines().filter_map(parse_line).collect()
}

/// Parse one line, returning `None` for anything that is not a
/// well-formed entity mention.
fn parse_line(line: &str) -> Option<Annotation> {
    if !line.starts_with(ENTITY_MARKER) {
        return None;
    }

    let mut fields = line.trim().splitn(3, '\t');
    let id = fields.next()?;
    let tag_info = fields.next()?;
    let text = fields.next()?;

    // Offsets after the type token are not needed
    let entity_type = tag_info.split_whitespace().next()?;

    Some(Annotation {
        id: id.to_string(),
        entity_type: entity_type.to_string(),
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_entity_line() {
        let anns = parse_annotations("T1\tADR 10 20\tnausea\n");
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].id, "T1");
        assert_eq!(anns[0].entity_type, "ADR");
        assert_eq!(anns[0].text, "nausea");
    }

    #[test]
    fn test_discontinuous_offsets_keep_type() {
        let anns = parse_annotations("T3\tADR 5 11;20 26\tmuscle pain\n");
        assert_eq!(anns[0].entity_type, "ADR");
        assert_eq!(anns[0].text, "muscle pain");
    }

    #[test]
    fn test_non_entity_lines_ignored() {
        let content = "\
T1\tDrug 0 7\tLipitor
#1\tAnnotatorNotes T1\tbrand name
R1\tCauses Arg1:T1 Arg2:T2
E1\tEvent:T2
A1\tNegated T2
";
        let anns = parse_annotations(content);
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].entity_type, "Drug");
    }

    #[test]
    fn test_two_field_line_is_skipped() {
        let with_bad = "T1\tADR 10 20\tnausea\nT2\tADR 30 40\nT3\tSymptom 50 55\tache\n";
        let without_bad = "T1\tADR 10 20\tnausea\nT3\tSymptom 50 55\tache\n";
        assert_eq!(parse_annotations(with_bad), parse_annotations(without_bad));
    }

    #[test]
    fn test_empty_tag_info_is_skipped() {
        assert!(parse_annotations("T1\t\tnausea\n").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let anns = parse_annotations("T1\tADR 10 20\tnausea\r\nT2\tDrug 0 4\tdrug\r\n");
        assert_eq!(anns.len(), 2);
        assert_eq!(anns[0].text, "nausea");
        assert_eq!(anns[1].text, "drug");
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_annotations("").is_empty());
    }

    #[test]
    fn test_read_annotation_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("drugA.1.ann");
        std::fs::write(&path, "T1\tADR 10 20\tnausea\n").unwrap();

        let anns = read_annotation_file(&path).unwrap();
        assert_eq!(anns.len(), 1);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.ann");

        let err = read_annotation_file(&path).unwrap_err();
        assert!(err.to_string().contains("missing.ann"));
    }
}
