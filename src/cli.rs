//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// cadec-stats - corpus statistics for brat-annotated text collections
///
/// Scans `<ROOT>/text/*.txt` and the matching `<ROOT>/original/*.ann`
/// files, prints document, annotation type and term frequencies, and
/// renders SVG charts.
///
/// Examples:
///   cadec-stats
///   cadec-stats ./CADEC.v2/cadec --top 50
///   cadec-stats ./corpus --no-charts --format json
///   cadec-stats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Corpus root containing the text and annotation directories
    #[arg(
        value_name = "ROOT",
        default_value = "CADEC.v2/cadec",
        env = "CADEC_ROOT"
    )]
    pub root: PathBuf,

    /// Directory to write chart files to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Omit category percentages from the text report
    #[arg(long)]
    pub no_percentages: bool,

    /// Number of most common annotated terms to report
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .cadec-stats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only, no progress bar)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .cadec-stats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Whether to draw a progress bar during the scan.
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            root: PathBuf::from("CADEC.v2/cadec"),
            output_dir: None,
            no_charts: false,
            no_percentages: false,
            top: None,
            format: OutputFormat::Text,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["cadec-stats"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.top.is_none());
        assert!(!args.no_charts);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "cadec-stats",
            "./corpus",
            "--top",
            "5",
            "--no-charts",
            "--format",
            "json",
            "-o",
            "out",
        ])
        .unwrap();
        assert_eq!(args.root, PathBuf::from("./corpus"));
        assert_eq!(args.top, Some(5));
        assert!(args.no_charts);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_validation_zero_top() {
        let mut args = make_args();
        args.top = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_show_progress() {
        let mut args = make_args();
        assert!(args.show_progress());

        args.format = OutputFormat::Json;
        assert!(!args.show_progress());

        args.format = OutputFormat::Text;
        args.quiet = true;
        assert!(!args.show_progress());
    }
}
