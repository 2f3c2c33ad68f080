use crate::InstrumentFailure;
use crate::error::PipelineError;
use crate::snapshot::{QuoteSummary, ReportedFinancials, StockSnapshot};
use analytics::{RiskMetricsEngine, StatementBalancer};
use configuration::RiskSettings;
use core_types::CompanyProfile;
use futures::future::join_all;
use indicatif::ProgressBar;
use market_data::MarketDataSource;
use std::sync::Arc;
use store::ProfileCache;

/// The outcome of one daily update over the whole universe.
#[derive(Debug, Default)]
pub struct DailyReport {
    /// Successful snapshots, in universe order.
    pub snapshots: Vec<StockSnapshot>,
    pub failures: Vec<InstrumentFailure>,
}

/// Turns each instrument's market data into a `StockSnapshot`.
#[derive(Clone)]
pub struct UpdatePipeline {
    source: Arc<dyn MarketDataSource>,
    engine: RiskMetricsEngine,
    balancer: StatementBalancer,
    lookback_years: u32,
}

impl UpdatePipeline {
    pub fn new(source: Arc<dyn MarketDataSource>, risk: &RiskSettings) -> Self {
        Self {
            source,
            engine: RiskMetricsEngine::new(risk.risk_free_rate, risk.periods_per_year),
            balancer: StatementBalancer::new(),
            lookback_years: risk.lookback_years,
        }
    }

    /// Processes every ticker concurrently and collects the results.
    ///
    /// A failed instrument is logged and recorded in `DailyReport::failures`; it never
    /// prevents the remaining instruments from being processed.
    pub async fn run(
        &self,
        tickers: &[String],
        profiles: &ProfileCache,
        progress: &ProgressBar,
    ) -> DailyReport {
        tracing::info!(count = tickers.len(), "Starting daily data run.");

        let tasks: Vec<_> = tickers
            .iter()
            .map(|symbol| {
                let pipeline = self.clone();
                let symbol = symbol.clone();
                let profile = profiles.get_or_placeholder(&symbol);
                let pb = progress.clone();

                tokio::spawn(async move {
                    pb.set_message(format!("Processing {symbol}..."));
                    let result = pipeline.process(&symbol, profile).await;
                    pb.inc(1);
                    result
                })
            })
            .collect();

        // Wait for all concurrent tasks to complete
        let results = join_all(tasks).await;

        let mut report = DailyReport::default();
        for (symbol, result) in tickers.iter().zip(results) {
            let outcome = result
                .map_err(|e| PipelineError::Task(symbol.clone(), e.to_string()))
                .and_then(|inner| inner);

            match outcome {
                Ok(snapshot) => report.snapshots.push(snapshot),
                Err(e) => {
                    tracing::warn!(symbol = %symbol, error = %e, "Failed to process instrument.");
                    report.failures.push(InstrumentFailure {
                        symbol: symbol.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            succeeded = report.snapshots.len(),
            failed = report.failures.len(),
            "Daily data run finished."
        );
        report
    }

    /// Builds the snapshot for a single instrument.
    pub async fn process(
        &self,
        symbol: &str,
        profile: CompanyProfile,
    ) -> Result<StockSnapshot, PipelineError> {
        let data = self.source.fetch_instrument(symbol).await?;

        let history = data.history.trailing_years(self.lookback_years);
        let (full_history, metrics) = self.engine.compute_risk_profile(&history).into_parts();

        let financials = data.statement.as_ref().map(|raw| ReportedFinancials {
            year: raw.period.clone(),
            statement: self.balancer.balance(raw),
        });
        if financials.is_none() {
            tracing::debug!(symbol, "No income statement available.");
        }

        Ok(StockSnapshot {
            symbol: symbol.to_string(),
            profile,
            quote: QuoteSummary::from_quote(&data.quote),
            metrics,
            full_history,
            financials,
        })
    }
}
