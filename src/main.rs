//! cadec-stats - corpus statistics for brat-annotated text collections
//!
//! A CLI tool that scans a directory of text documents and their `.ann`
//! sidecar files, prints document, annotation type and term frequencies,
//! and renders the distributions as SVG charts.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing text directory, unreadable file, bad config, etc.)

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod scanner;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use models::ReportMetadata;
use report::{ChartOptions, TextOptions};
use scanner::{CorpusScanner, ScanConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("cadec-stats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Analysis failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .cadec-stats.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so the report on stdout can be piped.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Scan the corpus, print the report and render charts.
fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    let mut scan_config = ScanConfig::from(&config.scanner);
    scan_config.show_progress = args.show_progress();

    info!("Scanning corpus at {}", args.root.display());
    let corpus_scanner = CorpusScanner::new(args.root.clone(), scan_config);
    let stats = corpus_scanner.scan()?;

    if stats.is_empty() {
        warn!("No text documents found in {}", corpus_scanner.text_dir().display());
    }

    let metadata = ReportMetadata {
        corpus_root: args.root.display().to_string(),
        analysis_date: Utc::now(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        duration_seconds: start_time.elapsed().as_secs_f64(),
        top_terms: config.report.top_terms,
    };
    let report = report::build_report(&stats, metadata);

    let output = match args.format {
        OutputFormat::Text => report::generate_text_report(
            &report,
            TextOptions {
                show_percentages: config.report.show_percentages,
            },
        ),
        OutputFormat::Json => report::generate_json_report(&report)?,
    };
    print!("{}", output);
    if args.format == OutputFormat::Json {
        println!();
    }

    if config.report.charts {
        let chart_options = ChartOptions {
            output_dir: PathBuf::from(&config.report.output_dir),
            top_terms: config.report.top_terms,
            histogram_bins: config.report.histogram_bins,
        };

        for path in report::render_charts(&stats, &chart_options)? {
            debug!("Chart written: {}", path.display());
        }
    } else {
        debug!("Chart rendering disabled");
    }

    info!(
        "Analysis complete in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
