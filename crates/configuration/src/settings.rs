use crate::error::ConfigError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// The instruments tracked when `config.toml` does not name any.
pub const DEFAULT_TICKERS: [&str; 26] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "NVDA", "META", "NFLX", //
    "JPM", "BAC", "V", "MA", //
    "JNJ", "PFE", "UNH", "LLY", //
    "XOM", "CVX", //
    "KO", "PEP", "MCD", "WMT", "COST", //
    "BA", "CAT", "MMM",
];

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub universe: Universe,
    #[serde(default)]
    pub risk: RiskSettings,
    #[serde(default)]
    pub storage: Storage,
}

impl Config {
    /// Rejects settings the analytics engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.universe.tickers.is_empty() {
            return Err(ConfigError::ValidationError(
                "universe.tickers must name at least one instrument".to_string(),
            ));
        }
        if let Some(blank) = self.universe.tickers.iter().find(|t| t.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "universe.tickers contains a blank symbol: {blank:?}"
            )));
        }
        if self.risk.periods_per_year == 0 {
            return Err(ConfigError::ValidationError(
                "risk.periods_per_year must be positive".to_string(),
            ));
        }
        if self.risk.risk_free_rate < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "risk.risk_free_rate must not be negative, got {}",
                self.risk.risk_free_rate
            )));
        }
        Ok(())
    }
}

/// The set of instruments processed on every update cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct Universe {
    pub tickers: Vec<String>,
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Parameters for the risk metrics engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    /// Annualized risk-free rate as a fraction (0.04 corresponds to 4%).
    pub risk_free_rate: Decimal,
    /// Annualization constant; 252 trading days for daily equity data.
    pub periods_per_year: u32,
    /// How many years of price history feed the drawdown curve and ratios.
    pub lookback_years: u32,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            risk_free_rate: Decimal::new(4, 2),
            periods_per_year: 252,
            lookback_years: 5,
        }
    }
}

/// Where input payloads are read from and results are written to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// Directory holding one market-data payload per instrument.
    pub data_dir: PathBuf,
    pub output_file: PathBuf,
    pub profile_file: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_file: PathBuf::from("stock_data.json"),
            profile_file: PathBuf::from("company_profiles.json"),
        }
    }
}
