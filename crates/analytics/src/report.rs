use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One point of the drawdown curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawdownPoint {
    pub date: NaiveDate,
    pub price: Decimal,
    /// Percent below the running peak, rounded to 2 dp. Always `<= 0`.
    #[serde(rename = "drawdown")]
    pub drawdown_pct: Decimal,
}

/// Annualized risk/performance ratios for a price series.
///
/// Every field is zero when the series has fewer than two observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub sharpe_ratio: Decimal,
    pub sortino_ratio: Decimal,
    pub max_drawdown_pct: Decimal,
}

/// The full output of `RiskMetricsEngine::compute_risk_profile`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskProfile {
    pub drawdowns: Vec<DrawdownPoint>,
    pub metrics: RiskMetrics,
}

impl RiskProfile {
    pub fn into_parts(self) -> (Vec<DrawdownPoint>, RiskMetrics) {
        (self.drawdowns, self.metrics)
    }
}
