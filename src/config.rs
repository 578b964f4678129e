//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.cadec-stats.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".cadec-stats.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Corpus layout settings.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Corpus layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Subdirectory of the corpus root holding text documents.
    #[serde(default = "default_text_dir")]
    pub text_dir: String,

    /// Subdirectory of the corpus root holding annotation files.
    #[serde(default = "default_annotation_dir")]
    pub annotation_dir: String,

    /// Extension of text documents.
    #[serde(default = "default_text_extension")]
    pub text_extension: String,

    /// Extension of annotation files.
    #[serde(default = "default_annotation_extension")]
    pub annotation_extension: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            text_dir: default_text_dir(),
            annotation_dir: default_annotation_dir(),
            text_extension: default_text_extension(),
            annotation_extension: default_annotation_extension(),
        }
    }
}

fn default_text_dir() -> String {
    "text".to_string()
}

fn default_annotation_dir() -> String {
    "original".to_string()
}

fn default_text_extension() -> String {
    "txt".to_string()
}

fn default_annotation_extension() -> String {
    "ann".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of entries in the top terms section.
    #[serde(default = "default_top_terms")]
    pub top_terms: usize,

    /// Show each category's share of the corpus.
    #[serde(default = "default_true")]
    pub show_percentages: bool,

    /// Render SVG charts.
    #[serde(default = "default_true")]
    pub charts: bool,

    /// Directory chart files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Number of bins in the text length histogram.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_terms: default_top_terms(),
            show_percentages: true,
            charts: true,
            output_dir: default_output_dir(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

fn default_top_terms() -> usize {
    20
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_histogram_bins() -> usize {
    20
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Check settings that deserialize fine but cannot produce a report.
    pub fn validate(&self) -> Result<()> {
        if self.report.top_terms == 0 {
            anyhow::bail!("report.top_terms must be at least 1");
        }

        if self.report.histogram_bins == 0 {
            anyhow::bail!("report.histogram_bins must be at least 1");
        }

        Ok(())
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(top) = args.top {
            self.report.top_terms = top;
        }

        if let Some(ref dir) = args.output_dir {
            self.report.output_dir = dir.to_string_lossy().to_string();
        }

        if args.no_charts {
            self.report.charts = false;
        }

        if args.no_percentages {
            self.report.show_percentages = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scanner.text_dir, "text");
        assert_eq!(config.scanner.annotation_dir, "original");
        assert_eq!(config.scanner.text_extension, "txt");
        assert_eq!(config.scanner.annotation_extension, "ann");
        assert_eq!(config.report.top_terms, 20);
        assert!(config.report.charts);
        assert!(config.report.show_percentages);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[scanner]
annotation_dir = "meddra"

[report]
top_terms = 50
charts = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.scanner.annotation_dir, "meddra");
        assert_eq!(config.scanner.text_dir, "text");
        assert_eq!(config.report.top_terms, 50);
        assert!(!config.report.charts);
        assert_eq!(config.report.histogram_bins, 20);
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[report]\noutput_dir = \"charts\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.report.output_dir, "charts");
    }

    #[test]
    fn test_load_invalid_config_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[report\n").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_zero_top_terms() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[report]\ntop_terms = 0\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("report.top_terms must be at least 1"));
    }

    #[test]
    fn test_load_rejects_zero_histogram_bins() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[report]\nhistogram_bins = 0\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("report.histogram_bins must be at least 1"));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.report.top_terms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[scanner]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.report.top_terms, 20);
    }
}
