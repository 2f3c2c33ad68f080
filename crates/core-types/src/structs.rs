use crate::error::CoreError;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily close for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub close: Decimal,
}

impl PriceObservation {
    pub fn new(date: NaiveDate, close: Decimal) -> Self {
        Self { date, close }
    }
}

/// A chronological sequence of closing prices covering a bounded lookback window.
///
/// `PriceSeries::new` trusts the caller to supply observations in strictly increasing
/// date order. Use `PriceSeries::try_new` when the ordering has not been established.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    observations: Vec<PriceObservation>,
}

impl PriceSeries {
    pub fn new(observations: Vec<PriceObservation>) -> Self {
        Self { observations }
    }

    /// Builds a series after checking that dates strictly increase and every close is positive.
    pub fn try_new(observations: Vec<PriceObservation>) -> Result<Self, CoreError> {
        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(CoreError::InvalidInput(
                    "price series".to_string(),
                    format!("{} does not follow {}", pair[1].date, pair[0].date),
                ));
            }
        }

        if let Some(bad) = observations.iter().find(|o| o.close <= Decimal::ZERO) {
            return Err(CoreError::InvalidInput(
                "price series".to_string(),
                format!("non-positive close {} on {}", bad.close, bad.date),
            ));
        }

        Ok(Self { observations })
    }

    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceObservation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn last(&self) -> Option<&PriceObservation> {
        self.observations.last()
    }

    /// Returns the observations dated within `years` calendar years of the latest one.
    pub fn trailing_years(&self, years: u32) -> PriceSeries {
        let Some(last) = self.last() else {
            return PriceSeries::default();
        };

        let cutoff = last
            .date
            .checked_sub_months(Months::new(years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN);

        let observations = self
            .observations
            .iter()
            .copied()
            .filter(|o| o.date >= cutoff)
            .collect();

        PriceSeries { observations }
    }
}

impl From<Vec<PriceObservation>> for PriceSeries {
    fn from(observations: Vec<PriceObservation>) -> Self {
        Self::new(observations)
    }
}

/// Raw income-statement figures for the most recent reporting period.
///
/// `cost_of_revenue` is `None` when the filer reports no such line item at all
/// (typical for banks), which is different from a reported zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementRaw {
    /// Fiscal period label as reported by the source, e.g. "2024".
    #[serde(default)]
    pub period: Option<String>,
    pub revenue: Decimal,
    pub net_income: Decimal,
    #[serde(default)]
    pub cost_of_revenue: Option<Decimal>,
}

impl IncomeStatementRaw {
    pub fn new(revenue: Decimal, net_income: Decimal, cost_of_revenue: Option<Decimal>) -> Self {
        Self {
            period: None,
            revenue,
            net_income,
            cost_of_revenue,
        }
    }
}

/// Live quote and vital signs for one instrument.
///
/// Optional fields are the ones the upstream provider does not report for every instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: Decimal,
    pub previous_close: Decimal,
    pub market_cap: Option<Decimal>,
    pub year_high: Decimal,
    pub year_low: Decimal,
    /// Fraction, e.g. 0.25 for a 25% margin.
    pub profit_margin: Option<Decimal>,
    /// Fraction, e.g. 0.15 for a 15% return on equity.
    pub return_on_equity: Option<Decimal>,
    pub target_price: Option<Decimal>,
    pub beta: Option<Decimal>,
}

/// Slow-changing descriptive data about a company, cached between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ceo: String,
    #[serde(default)]
    pub hq: String,
    #[serde(default)]
    pub employees: u64,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub industry: String,
}

impl CompanyProfile {
    /// The stand-in used when no cached profile exists for a symbol yet.
    pub fn placeholder(symbol: &str) -> Self {
        Self {
            name: symbol.to_string(),
            description: "Run `stockdesk profiles` to fetch the company profile.".to_string(),
            ceo: "N/A".to_string(),
            hq: "N/A".to_string(),
            employees: 0,
            website: "#".to_string(),
            sector: "N/A".to_string(),
            industry: "N/A".to_string(),
        }
    }

    /// A profile is complete once it carries a name, a CEO and a sector.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.ceo.is_empty() && !self.sector.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn obs(y: i32, m: u32, d: u32, close: Decimal) -> PriceObservation {
        PriceObservation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), close)
    }

    #[test]
    fn try_new_rejects_out_of_order_dates() {
        let result = PriceSeries::try_new(vec![
            obs(2024, 1, 3, dec!(10)),
            obs(2024, 1, 2, dec!(11)),
        ]);
        assert!(matches!(result, Err(CoreError::InvalidInput(_, _))));
    }

    #[test]
    fn try_new_rejects_duplicate_dates() {
        let result = PriceSeries::try_new(vec![
            obs(2024, 1, 2, dec!(10)),
            obs(2024, 1, 2, dec!(11)),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn try_new_rejects_non_positive_close() {
        let result = PriceSeries::try_new(vec![obs(2024, 1, 2, dec!(0))]);
        assert!(result.is_err());
    }

    #[test]
    fn trailing_years_keeps_only_the_window() {
        let series = PriceSeries::new(vec![
            obs(2018, 6, 1, dec!(1)),
            obs(2019, 1, 15, dec!(2)),
            obs(2020, 1, 15, dec!(3)),
            obs(2024, 1, 15, dec!(4)),
        ]);

        let window = series.trailing_years(5);
        let dates: Vec<_> = window.iter().map(|o| o.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2019, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            ]
        );
    }

    #[test]
    fn trailing_years_of_empty_series_is_empty() {
        assert!(PriceSeries::default().trailing_years(5).is_empty());
    }

    #[test]
    fn missing_cost_of_revenue_deserializes_as_none() {
        let raw: IncomeStatementRaw =
            serde_json::from_str(r#"{"revenue": 1000, "net_income": 200}"#).unwrap();
        assert_eq!(raw.cost_of_revenue, None);
        assert_eq!(raw.revenue, dec!(1000));
    }

    #[test]
    fn placeholder_profile_fills_na_fields() {
        let profile = CompanyProfile::placeholder("JPM");
        assert_eq!(profile.name, "JPM");
        assert_eq!(profile.ceo, "N/A");
        assert_eq!(profile.website, "#");
    }

    #[test]
    fn profile_without_ceo_is_incomplete() {
        let profile: CompanyProfile =
            serde_json::from_str(r#"{"name": "Apple Inc.", "sector": "Technology"}"#).unwrap();
        assert!(!profile.is_complete());
    }
}
