use analytics::{BalancedIncomeStatement, DrawdownPoint, RiskMetrics};
use core_types::{CompanyProfile, Quote};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Display-ready quote figures derived from a raw `Quote`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSummary {
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub market_cap: Option<Decimal>,
    /// Percent, not fraction.
    pub profit_margin: Decimal,
    /// Percent, not fraction.
    pub roe: Decimal,
    pub target_price: Decimal,
    pub high_52: Decimal,
    pub low_52: Decimal,
    pub beta: Decimal,
}

impl QuoteSummary {
    pub fn from_quote(quote: &Quote) -> Self {
        let change = quote.price - quote.previous_close;
        let change_percent = change
            .checked_div(quote.previous_close)
            .and_then(|c| c.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO);
        let as_percent = |fraction: Option<Decimal>| {
            fraction
                .and_then(|f| f.checked_mul(Decimal::ONE_HUNDRED))
                .map_or(Decimal::ZERO, round2)
        };

        Self {
            price: round2(quote.price),
            change: round2(change),
            change_percent: round2(change_percent),
            market_cap: quote.market_cap,
            profit_margin: as_percent(quote.profit_margin),
            roe: as_percent(quote.return_on_equity),
            target_price: quote.target_price.unwrap_or(Decimal::ZERO),
            high_52: round2(quote.year_high),
            low_52: round2(quote.year_low),
            beta: round2(quote.beta.unwrap_or(Decimal::ONE)),
        }
    }
}

/// A balanced statement tagged with the fiscal period it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedFinancials {
    pub year: Option<String>,
    #[serde(flatten)]
    pub statement: BalancedIncomeStatement,
}

/// Everything published for one instrument after a daily update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSnapshot {
    pub symbol: String,
    #[serde(flatten)]
    pub profile: CompanyProfile,
    #[serde(flatten)]
    pub quote: QuoteSummary,
    #[serde(flatten)]
    pub metrics: RiskMetrics,
    pub full_history: Vec<DrawdownPoint>,
    /// `None` when the provider had no income statement for the instrument.
    pub financials: Option<ReportedFinancials>,
}
