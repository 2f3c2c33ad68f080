use crate::error::MarketDataError;
use crate::InstrumentData;
use chrono::NaiveDate;
use core_types::{IncomeStatementRaw, PriceObservation, PriceSeries, Quote};
use rust_decimal::Decimal;
use serde::Deserialize;

// Using `#[serde(rename_all = "camelCase")]` to map the provider's camelCase keys to snake_case.

/// One instrument's market-data payload as delivered by the provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentPayload {
    pub quote: QuotePayload,
    #[serde(default)]
    pub history: Vec<HistoryRow>,
    /// Absent when the provider has no income statement for the instrument.
    #[serde(default)]
    pub financials: Option<FinancialsPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    pub last_price: Decimal,
    pub previous_close: Decimal,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    pub year_high: Decimal,
    pub year_low: Decimal,
    #[serde(default)]
    pub profit_margins: Option<Decimal>,
    #[serde(default)]
    pub return_on_equity: Option<Decimal>,
    #[serde(default)]
    pub target_mean_price: Option<Decimal>,
    #[serde(default)]
    pub beta: Option<Decimal>,
}

/// A single daily close.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRow {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// The most recent income-statement column.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialsPayload {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub total_revenue: Decimal,
    #[serde(default)]
    pub net_income: Decimal,
    /// Banks and other financials usually omit this line entirely.
    #[serde(default)]
    pub cost_of_revenue: Option<Decimal>,
}

/// Descriptive company information used to build a `CompanyProfile`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub long_business_summary: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub company_officers: Vec<Officer>,
    #[serde(default)]
    pub full_time_employees: Option<u64>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Officer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl InstrumentPayload {
    /// Converts the raw payload into domain types.
    ///
    /// History rows are sorted by date and the first row of any duplicated date wins, so
    /// the resulting `PriceSeries` satisfies the engine's ordering precondition.
    pub fn into_instrument_data(self, symbol: &str) -> Result<InstrumentData, MarketDataError> {
        let mut rows = self.history;
        rows.sort_by_key(|r| r.date);
        let before = rows.len();
        rows.dedup_by_key(|r| r.date);
        if rows.len() != before {
            tracing::warn!(
                symbol,
                dropped = before - rows.len(),
                "Dropped duplicate-dated history rows."
            );
        }

        let observations = rows
            .into_iter()
            .map(|r| PriceObservation::new(r.date, r.close))
            .collect();
        let history = PriceSeries::try_new(observations)
            .map_err(|e| MarketDataError::InvalidData(symbol.to_string(), e.to_string()))?;

        let q = self.quote;
        let quote = Quote {
            price: q.last_price,
            previous_close: q.previous_close,
            market_cap: q.market_cap,
            year_high: q.year_high,
            year_low: q.year_low,
            profit_margin: q.profit_margins,
            return_on_equity: q.return_on_equity,
            target_price: q.target_mean_price,
            beta: q.beta,
        };

        let statement = self.financials.map(|f| IncomeStatementRaw {
            period: f.period,
            revenue: f.total_revenue,
            net_income: f.net_income,
            cost_of_revenue: f.cost_of_revenue,
        });

        Ok(InstrumentData {
            symbol: symbol.to_string(),
            quote,
            history,
            statement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const PAYLOAD: &str = r#"{
        "quote": {
            "lastPrice": 201.5, "previousClose": 199.0, "marketCap": 3000000000000,
            "yearHigh": 237.2, "yearLow": 164.1, "profitMargins": 0.24, "beta": 1.2
        },
        "history": [
            {"date": "2024-01-03", "close": 184.25},
            {"date": "2024-01-02", "close": 185.64},
            {"date": "2024-01-03", "close": 999.0}
        ],
        "financials": {"period": "2024", "totalRevenue": 1000, "netIncome": 200}
    }"#;

    #[test]
    fn payload_converts_to_sorted_deduplicated_history() {
        let payload: InstrumentPayload = serde_json::from_str(PAYLOAD).unwrap();
        let data = payload.into_instrument_data("AAPL").unwrap();

        let closes: Vec<_> = data.history.iter().map(|o| o.close).collect();
        assert_eq!(closes, vec![dec!(185.64), dec!(184.25)]);
        assert_eq!(data.quote.price, dec!(201.5));
        assert_eq!(data.quote.return_on_equity, None);
    }

    #[test]
    fn missing_cost_of_revenue_stays_missing() {
        let payload: InstrumentPayload = serde_json::from_str(PAYLOAD).unwrap();
        let statement = payload.into_instrument_data("JPM").unwrap().statement.unwrap();
        assert_eq!(statement.cost_of_revenue, None);
        assert_eq!(statement.period.as_deref(), Some("2024"));
    }

    #[test]
    fn non_positive_close_is_invalid_data() {
        let payload: InstrumentPayload = serde_json::from_str(
            r#"{"quote": {"lastPrice": 1, "previousClose": 1, "yearHigh": 1, "yearLow": 1},
                "history": [{"date": "2024-01-02", "close": -3}]}"#,
        )
        .unwrap();
        assert!(matches!(
            payload.into_instrument_data("BAD"),
            Err(MarketDataError::InvalidData(_, _))
        ));
    }

    #[test]
    fn company_info_tolerates_missing_fields() {
        let info: CompanyInfo = serde_json::from_str(r#"{"shortName": "Apple Inc."}"#).unwrap();
        assert_eq!(info.short_name.as_deref(), Some("Apple Inc."));
        assert!(info.company_officers.is_empty());
    }
}
