//! # Stockdesk Market Data
//!
//! The seam between the analytics core and whoever supplies prices, quotes, statements
//! and company information. The pipeline only ever sees the `MarketDataSource` trait, so
//! a remote provider client and the file-backed source below are interchangeable.

use async_trait::async_trait;
use core_types::{IncomeStatementRaw, PriceSeries, Quote};

pub mod error;
pub mod file_source;
pub mod responses;

// --- Public API ---
pub use error::MarketDataError;
pub use file_source::FileMarketData;
pub use responses::{CompanyInfo, InstrumentPayload, Officer};

/// Everything the daily update needs for one instrument.
#[derive(Debug, Clone)]
pub struct InstrumentData {
    pub symbol: String,
    pub quote: Quote,
    /// Chronological daily closes.
    pub history: PriceSeries,
    /// The latest reporting period, if the provider has one.
    pub statement: Option<IncomeStatementRaw>,
}

/// The generic, abstract interface for a market-data provider.
/// This trait is the contract the update pipeline uses, allowing the
/// underlying implementation (remote or file-backed) to be swapped out.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches the quote, price history and latest income statement for a symbol.
    async fn fetch_instrument(&self, symbol: &str) -> Result<InstrumentData, MarketDataError>;

    /// Fetches descriptive company information for a symbol.
    async fn fetch_company_info(&self, symbol: &str) -> Result<CompanyInfo, MarketDataError>;
}
