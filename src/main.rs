//! Marquee main entry point
//!
//! Command-line interface for the chart-to-spreadsheet movie extractor.
//! A run always finishes with consolidation, browser teardown, and a
//! terminal summary, no matter how the extraction itself went.

use clap::Parser;
use marquee::config::{load_config_with_hash, Config};
use marquee::driver::ChromeDriver;
use marquee::output::{consolidate, RunSummary, RunTally};
use marquee::paths::RunPaths;
use marquee::scraper::CrawlSequencer;
use marquee::storage::{JsonFileStore, RecordStore};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Marquee: a chart-to-spreadsheet movie extractor
///
/// Marquee opens a ranked movie chart in a headless browser, extracts the
/// detail page of each entry into a JSON record, and consolidates all
/// records of the run into one CSV table.
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(version)]
#[command(about = "Extract a ranked movie chart into a CSV table", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Re-run consolidation over an existing run directory, then exit
    #[arg(long, value_name = "RUN_DIR")]
    consolidate: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration
    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(run_dir) = &cli.consolidate {
        setup_logging(cli.verbose, cli.quiet, None)?;
        return handle_consolidate(&config, run_dir);
    }

    // The run log lives inside the run tree, so the tree comes first.
    let paths = match RunPaths::create(Path::new(&config.output.base_dir)) {
        Ok(paths) => paths,
        Err(e) => {
            setup_logging(cli.verbose, cli.quiet, None)?;
            tracing::error!("Could not create the run directory tree: {}", e);
            return Err(e.into());
        }
    };

    setup_logging(
        cli.verbose,
        cli.quiet,
        Some(&paths.log_dir.join("execution.log")),
    )?;

    handle_scrape(config, config_hash, paths).await
}

/// Sets up the tracing subscriber: console output plus, when a path is
/// given, a plain-text copy into the run's log file.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    use tracing_subscriber::prelude::*;

    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("marquee=info,warn"),
            1 => EnvFilter::new("marquee=debug,info"),
            2 => EnvFilter::new("marquee=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let console = tracing_subscriber::fmt::layer().with_target(false);

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            let file_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::sync::Arc::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file_layer)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
        }
    }

    Ok(())
}

/// Handles the main extraction run.
///
/// The extraction itself may fail at any point; the cleanup phase below it
/// runs regardless: consolidation over whatever was persisted, browser
/// teardown, and the terminal summary.
async fn handle_scrape(
    config: Config,
    config_hash: Option<String>,
    paths: RunPaths,
) -> anyhow::Result<()> {
    let started = Instant::now();

    tracing::info!("==============================================");
    tracing::info!("Starting the movie chart extraction run");
    tracing::info!("Run directory: {}", paths.root.display());
    match &config_hash {
        Some(hash) => tracing::info!("Configuration loaded (hash: {})", hash),
        None => tracing::info!("Using built-in default configuration"),
    }
    tracing::info!("==============================================");

    let mut tally = RunTally::default();
    let mut store: Option<JsonFileStore> = None;
    let mut sequencer: Option<CrawlSequencer<ChromeDriver>> = None;

    let outcome = run_extraction(&config, &paths, &mut sequencer, &mut store, &mut tally).await;
    if let Err(e) = &outcome {
        tracing::error!("Unhandled failure in the main run: {}", e);
    }

    // Cleanup phase: consolidation, teardown, and summary happen on every
    // exit path, including after the failure above.
    let artifact = match &store {
        Some(store) => {
            let output_path = paths.processed_dir.join(&config.output.table_filename);
            consolidate(store, &output_path).ok().flatten()
        }
        None => None,
    };

    if let Some(sequencer) = sequencer.take() {
        if let Err(e) = sequencer.quit().await {
            tracing::warn!("Browser session did not shut down cleanly: {}", e);
        }
    }

    let summary = RunSummary {
        tally,
        elapsed: started.elapsed(),
        run_dir: paths.root.clone(),
        artifact,
    };
    summary.print();

    tracing::info!("Extraction run finished.");
    outcome.map_err(Into::into)
}

/// The fallible part of the run: storage setup, browser launch, and the
/// paced fetch-and-persist loop.
///
/// Store and sequencer are handed back through the `Option` slots even when
/// this returns early, so the caller can still consolidate and tear down.
async fn run_extraction(
    config: &Config,
    paths: &RunPaths,
    sequencer_slot: &mut Option<CrawlSequencer<ChromeDriver>>,
    store_slot: &mut Option<JsonFileStore>,
    tally: &mut RunTally,
) -> marquee::Result<()> {
    let store = store_slot.insert(JsonFileStore::open(&paths.records_dir)?);

    let driver = ChromeDriver::launch(&config.browser).await?;
    let sequencer = sequencer_slot.insert(CrawlSequencer::new(
        driver,
        config.scrape.clone(),
        paths.debug_dir.clone(),
    ));

    sequencer.start(&config.scrape.index_url).await;

    while let Some(item) = sequencer.next_item().await {
        match item {
            Some(record) => {
                tally.record(true);
                if let Err(e) = store.put(&record) {
                    tracing::error!("Failed to persist the extracted record: {}", e);
                }
            }
            None => tally.record(false),
        }
    }

    Ok(())
}

/// Handles the --consolidate mode: rebuild the table of an existing run
/// without launching a browser.
fn handle_consolidate(config: &Config, run_dir: &Path) -> anyhow::Result<()> {
    let paths = RunPaths::existing(run_dir);
    std::fs::create_dir_all(&paths.processed_dir)?;

    let store = JsonFileStore::open(&paths.records_dir)?;
    let output_path = paths.processed_dir.join(&config.output.table_filename);

    match consolidate(&store, &output_path)? {
        Some(path) => println!("✓ Consolidated table written to: {}", path.display()),
        None => println!("No records to consolidate in {}", run_dir.display()),
    }

    Ok(())
}
