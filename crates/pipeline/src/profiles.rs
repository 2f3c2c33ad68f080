use crate::InstrumentFailure;
use core_types::CompanyProfile;
use market_data::{CompanyInfo, MarketDataSource};
use std::sync::Arc;
use store::ProfileCache;

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn headquarters(info: &CompanyInfo) -> String {
    let parts: Vec<&str> = [&info.city, &info.state, &info.country]
        .into_iter()
        .filter_map(|part| non_empty(part.as_ref()))
        .collect();

    if parts.is_empty() {
        "N/A".to_string()
    } else {
        parts.join(", ")
    }
}

/// The first officer titled CEO, falling back to whoever is listed first.
fn chief_executive(info: &CompanyInfo) -> String {
    let is_ceo = |title: &str| {
        let title = title.to_lowercase();
        title.contains("ceo") || title.contains("chief executive officer")
    };

    info.company_officers
        .iter()
        .find(|o| o.title.as_deref().is_some_and(is_ceo))
        .or_else(|| info.company_officers.first())
        .and_then(|o| non_empty(o.name.as_ref()))
        .unwrap_or("N/A")
        .to_string()
}

/// Builds a `CompanyProfile` from a provider info record.
///
/// An existing non-empty description is kept, so hand-edited descriptions survive a refresh.
pub fn build_profile(
    symbol: &str,
    info: &CompanyInfo,
    existing_description: Option<&str>,
) -> CompanyProfile {
    let description = existing_description
        .filter(|d| !d.trim().is_empty())
        .or_else(|| non_empty(info.long_business_summary.as_ref()))
        .unwrap_or("No description available.");

    CompanyProfile {
        name: non_empty(info.short_name.as_ref())
            .or_else(|| non_empty(info.long_name.as_ref()))
            .unwrap_or(symbol)
            .to_string(),
        description: description.to_string(),
        ceo: chief_executive(info),
        hq: headquarters(info),
        employees: info.full_time_employees.unwrap_or(0),
        website: non_empty(info.website.as_ref()).unwrap_or("N/A").to_string(),
        sector: non_empty(info.sector.as_ref()).unwrap_or("Unknown").to_string(),
        industry: non_empty(info.industry.as_ref()).unwrap_or("Unknown").to_string(),
    }
}

/// What a profile refresh did for each ticker.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub updated: Vec<String>,
    /// Tickers whose cached profile was already complete.
    pub skipped: Vec<String>,
    pub failures: Vec<InstrumentFailure>,
}

impl RefreshReport {
    /// Whether the cache changed and needs saving.
    pub fn is_modified(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// Fills in missing or incomplete cached company profiles.
pub struct ProfileRefresh {
    source: Arc<dyn MarketDataSource>,
}

impl ProfileRefresh {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }

    pub async fn run(&self, tickers: &[String], cache: &mut ProfileCache) -> RefreshReport {
        tracing::info!(count = tickers.len(), "Updating static company data.");
        let mut report = RefreshReport::default();

        for symbol in tickers {
            if cache.is_complete(symbol) {
                tracing::debug!(symbol = %symbol, "Profile already cached; skipping.");
                report.skipped.push(symbol.clone());
                continue;
            }

            match self.source.fetch_company_info(symbol).await {
                Ok(info) => {
                    let existing = cache.get(symbol).map(|p| p.description.as_str());
                    let profile = build_profile(symbol, &info, existing);
                    tracing::info!(
                        symbol = %symbol,
                        name = %profile.name,
                        "Fetched company profile."
                    );
                    cache.insert(symbol.clone(), profile);
                    report.updated.push(symbol.clone());
                }
                Err(e) => {
                    tracing::warn!(
                        symbol = %symbol,
                        error = %e,
                        "Failed to fetch company profile."
                    );
                    report.failures.push(InstrumentFailure {
                        symbol: symbol.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}
