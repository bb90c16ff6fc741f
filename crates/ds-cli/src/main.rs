//! CLI entry point for the design system scanner.
//!
//! Scans a serialized design document, classifies its components, and
//! persists the resulting session for later lookups.
//!
//! # Usage
//!
//! ```bash
//! ds-scan [OPTIONS] <COMMAND>
//!
//! # Scan a document and store the session
//! ds-scan scan --document design.json --store .ds-scan
//!
//! # Best component for a UI role in the stored session
//! ds-scan lookup --store .ds-scan button
//!
//! # Classify layer names without a document
//! ds-scan classify "Primary Button" "Nav Bar"
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::collections::BTreeMap;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use ds_core::ScannerConfig;
use ds_scanner::{
    FileStore, ScanReport, Scanner, SnapshotHost, StatsSnapshot, classify, component_id_for_type,
    load_last_scan, persist_session,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Scans design documents and classifies their components by UI role.
#[derive(Parser)]
#[command(name = "ds-scan", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Directory holding persisted sessions.
    ///
    /// Defaults to `./.ds-scan` if not specified.
    #[arg(short, long, global = true, env = "DS_SCAN_STORE")]
    store: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Scan a document and persist the session.
    Scan {
        /// Serialized document to scan.
        #[arg(short, long, env = "DS_SCAN_DOCUMENT")]
        document: Utf8PathBuf,

        /// Scanner configuration file (JSON).
        #[arg(short, long, env = "DS_SCAN_CONFIG")]
        config: Option<Utf8PathBuf>,

        /// Override the number of concurrent analyses.
        #[arg(long)]
        concurrency: Option<usize>,

        /// Write the session JSON to this file (defaults to none).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,

        /// Skip persisting the session to the store.
        #[arg(long)]
        no_persist: bool,

        /// Show every component and recovered error.
        #[arg(long)]
        detailed: bool,
    },

    /// Print the best component id for a UI role from the stored session.
    Lookup {
        /// UI role, e.g. `button`.
        role: String,
    },

    /// Print a summary of the stored session.
    Show,

    /// Classify layer names.
    Classify {
        /// Names to classify.
        #[arg(required = true)]
        names: Vec<String>,
    },
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects `RUST_LOG` if set. Otherwise uses `debug` with `--verbose` and
/// `info` by default. Logs go to stderr so session JSON on stdout stays clean.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},mio=warn"))
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Loads the scanner configuration, applying CLI overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the result is invalid.
fn load_config(
    path: Option<&Utf8Path>,
    concurrency: Option<usize>,
) -> color_eyre::Result<ScannerConfig> {
    let mut config = match path {
        Some(path) => ScannerConfig::from_json_file(path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config {}: {}", path, e))?,
        None => ScannerConfig::default(),
    };
    if let Some(n) = concurrency {
        config = config.with_max_concurrent_analyses(n);
    }
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;
    Ok(config)
}

fn store_dir(cli: &Cli) -> Utf8PathBuf {
    cli.store
        .clone()
        .unwrap_or_else(|| Utf8PathBuf::from("./.ds-scan"))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Scans a document, prints a summary, and persists the session.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or the page list is
/// unavailable. Failing to write the output or the stored session is also an
/// error.
async fn run_scan(
    store: &FileStore,
    document: &Utf8Path,
    config: ScannerConfig,
    output: Option<Utf8PathBuf>,
    persist: bool,
    detailed: bool,
) -> color_eyre::Result<()> {
    info!(document = %document, "Loading document");
    let host = SnapshotHost::from_json_file(document)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load document: {}", e))?;

    let scanner =
        Scanner::new(config).map_err(|e| color_eyre::eyre::eyre!("Failed to create scanner: {}", e))?;
    let report = scanner
        .scan(&host)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Scan failed: {}", e))?;

    print_stats_summary(&report.stats);
    print_type_counts(&report);
    if detailed {
        print_detailed_components(&report);
    }

    if !report.errors.is_empty() {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle)?;
        writeln!(handle, "Recovered errors ({}):", report.errors.len())?;
        if detailed {
            for error in &report.errors {
                writeln!(handle, "  {error}")?;
            }
        } else {
            writeln!(handle, "  (use --detailed to list them)")?;
        }
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report.session)?;
        tokio::fs::write(path.as_std_path(), json).await?;
        info!(path = %path, "Session written");
    }

    if persist {
        persist_session(store, &report.session)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to persist session: {}", e))?;
        info!(store = %store.dir(), "Session stored");
    }

    Ok(())
}

/// Prints the best component id for `role`.
///
/// # Errors
///
/// Returns an error if the stored session cannot be read.
async fn run_lookup(store: &FileStore, role: &str) -> color_eyre::Result<()> {
    let id = component_id_for_type(store, role)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read session: {}", e))?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match id {
        Some(id) => writeln!(handle, "{id}")?,
        None => {
            return Err(color_eyre::eyre::eyre!(
                "No component of type '{}' in {}",
                role,
                store.dir()
            ));
        }
    }
    Ok(())
}

/// Prints a summary of the stored session.
///
/// # Errors
///
/// Returns an error if no session is stored or it cannot be read.
async fn run_show(store: &FileStore) -> color_eyre::Result<()> {
    let session = load_last_scan(store)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read session: {}", e))?
        .ok_or_else(|| color_eyre::eyre::eyre!("No session stored in {}", store.dir()))?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Stored Session")?;
    writeln!(handle, "==============")?;
    writeln!(handle, "Version:       {}", session.version())?;
    writeln!(handle, "File key:      {}", session.file_key().unwrap_or("-"))?;
    writeln!(handle, "Scan time:     {}", session.scan_time())?;
    writeln!(handle, "Components:    {}", session.components().len())?;
    writeln!(
        handle,
        "Color styles:  {}",
        session.color_styles().map_or(0, |styles| styles.len())
    )?;
    writeln!(
        handle,
        "Text styles:   {}",
        session.text_styles().map_or(0, <[_]>::len)
    )?;
    writeln!(
        handle,
        "Design tokens: {}",
        session.design_tokens().map_or(0, <[_]>::len)
    )?;
    Ok(())
}

/// Prints the role and confidence for each name.
fn run_classify(names: &[String]) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    for name in names {
        let (role, confidence) = classify(name);
        writeln!(handle, "{name}\t{role}\t{confidence:.2}")?;
    }
    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints a summary of scan statistics.
fn print_stats_summary(stats: &StatsSnapshot) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let _ = writeln!(handle);
    let _ = writeln!(handle, "Design System Scan Summary");
    let _ = writeln!(handle, "==========================");
    let _ = writeln!(handle);
    let _ = writeln!(
        handle,
        "Pages scanned:       {} ({} skipped)",
        stats.pages_scanned, stats.pages_skipped
    );
    let _ = writeln!(handle, "Components found:    {}", stats.found);
    let _ = writeln!(
        handle,
        "Components emitted:  {} ({:.1}% full analysis)",
        stats.emitted(),
        stats.full_analysis_percent()
    );
    let _ = writeln!(handle, "  Degraded:          {}", stats.degraded);
    let _ = writeln!(handle, "  Dropped:           {}", stats.dropped);
    let _ = writeln!(handle, "  Duplicates:        {}", stats.duplicates);
    let _ = writeln!(handle, "Slot lookups failed: {}", stats.slot_failures);
    if stats.token_fallback {
        let _ = writeln!(handle, "Design tokens synthesized from color styles");
    }
}

/// Prints how many components were classified as each role.
fn print_type_counts(report: &ScanReport) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in report.session.components() {
        *counts.entry(record.suggested_type.as_str()).or_default() += 1;
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle);
    let _ = writeln!(handle, "By type:");
    for (role, count) in counts {
        let _ = writeln!(handle, "  {role:<16} {count}");
    }
}

/// Prints one line per component.
fn print_detailed_components(report: &ScanReport) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle);
    let _ = writeln!(handle, "Components:");
    for record in report.session.components() {
        let _ = writeln!(
            handle,
            "  {:<12} {:<16} {:.2}  {}",
            record.id, record.suggested_type, record.confidence, record.name
        );
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);
    let store = FileStore::new(store_dir(&cli));

    match &cli.command {
        Commands::Scan {
            document,
            config,
            concurrency,
            output,
            no_persist,
            detailed,
        } => {
            let config = load_config(config.as_deref(), *concurrency)?;
            run_scan(&store, document, config, output.clone(), !no_persist, *detailed).await
        }
        Commands::Lookup { role } => run_lookup(&store, role).await,
        Commands::Show => run_show(&store).await,
        Commands::Classify { names } => run_classify(names),
    }
}
