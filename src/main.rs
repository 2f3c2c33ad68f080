use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use market_data::{FileMarketData, MarketDataSource};
use pipeline::{ProfileRefresh, UpdatePipeline, progress_bar};
use std::path::PathBuf;
use std::sync::Arc;
use store::{JsonRepository, ProfileCache};
use tracing_subscriber::EnvFilter;

/// The main entry point for the stockdesk application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let filter = match &cli.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = configuration::load_config_from(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    // Execute the appropriate command
    match cli.command {
        Commands::Update => handle_update(&config).await,
        Commands::Profiles => handle_profiles(&config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Derives risk metrics and balanced income statements for a universe of stocks.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Log filter, e.g. "debug" or "pipeline=debug". Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daily update and write the stock data file.
    Update,
    /// Fill in missing company profiles in the profile cache.
    Profiles,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn data_source(config: &Config) -> Arc<dyn MarketDataSource> {
    Arc::new(FileMarketData::new(config.storage.data_dir.clone()))
}

/// Handles the orchestration of the daily update.
async fn handle_update(config: &Config) -> anyhow::Result<()> {
    let tickers = &config.universe.tickers;
    let profiles = ProfileCache::load(config.storage.profile_file.clone()).await;
    let pipeline = UpdatePipeline::new(data_source(config), &config.risk);

    let progress = progress_bar(tickers.len())?;
    let report = pipeline.run(tickers, &profiles, &progress).await;
    progress.finish_with_message("Update complete!");

    let output = JsonRepository::new(config.storage.output_file.clone());
    output
        .save(&report.snapshots)
        .await
        .context("writing the stock data file")?;

    let mut table = Table::new();
    table.set_header(vec!["Symbol", "Sharpe", "Sortino", "Max DD %", "Financials"]);
    for snapshot in &report.snapshots {
        table.add_row(vec![
            snapshot.symbol.clone(),
            snapshot.metrics.sharpe_ratio.to_string(),
            snapshot.metrics.sortino_ratio.to_string(),
            snapshot.metrics.max_drawdown_pct.to_string(),
            if snapshot.financials.is_some() { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");

    for failure in &report.failures {
        eprintln!("Failed {}: {}", failure.symbol, failure.reason);
    }

    tracing::info!(
        path = %output.path().display(),
        written = report.snapshots.len(),
        failed = report.failures.len(),
        "Stock data saved."
    );
    Ok(())
}

/// Handles the static company-profile refresh.
async fn handle_profiles(config: &Config) -> anyhow::Result<()> {
    let path = config.storage.profile_file.clone();
    let mut cache = ProfileCache::load(path.clone()).await;

    let refresh = ProfileRefresh::new(data_source(config));
    let report = refresh.run(&config.universe.tickers, &mut cache).await;

    if report.is_modified() {
        cache
            .save(path.clone())
            .await
            .context("saving the company profile cache")?;
        tracing::info!(
            path = %path.display(),
            updated = report.updated.len(),
            "Company profile cache updated."
        );
    } else {
        tracing::info!("No changes needed. Profile cache is up to date.");
    }

    for failure in &report.failures {
        eprintln!("Failed to fetch static data for {}: {}", failure.symbol, failure.reason);
    }
    Ok(())
}
