//! # Stockdesk Pipeline
//!
//! The orchestration around the analytics core: the daily update that turns every
//! instrument's market data into a `StockSnapshot`, and the slower refresh of cached
//! company profiles.
//!
//! One instrument failing never stops the rest of the universe; failures are collected
//! alongside the successful results.

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

pub mod error;
pub mod profiles;
pub mod snapshot;
pub mod update;

pub use error::PipelineError;
pub use profiles::{ProfileRefresh, RefreshReport, build_profile};
pub use snapshot::{QuoteSummary, ReportedFinancials, StockSnapshot};
pub use update::{DailyReport, UpdatePipeline};

/// Why a single instrument could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentFailure {
    pub symbol: String,
    pub reason: String,
}

/// A progress bar sized to the universe, in the style used by every command.
pub fn progress_bar(len: usize) -> Result<ProgressBar, PipelineError> {
    let progress_bar = ProgressBar::new(len as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(concat!(
                "{spinner:.green} [{elapsed_precise}] ",
                "[{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            ))?
            .progress_chars("#>-"),
    );
    Ok(progress_bar)
}
