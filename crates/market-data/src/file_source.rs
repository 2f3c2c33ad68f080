use crate::error::MarketDataError;
use crate::responses::{CompanyInfo, InstrumentPayload};
use crate::{InstrumentData, MarketDataSource};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::PathBuf;

/// A `MarketDataSource` backed by provider payloads saved in a directory.
///
/// Layout: `<root>/<SYMBOL>.json` holds an `InstrumentPayload` and
/// `<root>/<SYMBOL>.info.json` holds a `CompanyInfo`.
#[derive(Debug, Clone)]
pub struct FileMarketData {
    root: PathBuf,
}

impl FileMarketData {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn instrument_path(&self, symbol: &str) -> PathBuf {
        self.root.join(format!("{symbol}.json"))
    }

    fn info_path(&self, symbol: &str) -> PathBuf {
        self.root.join(format!("{symbol}.info.json"))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        symbol: &str,
        path: PathBuf,
    ) -> Result<T, MarketDataError> {
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MarketDataError::NotFound(symbol.to_string()));
            }
            Err(source) => return Err(MarketDataError::Io { path, source }),
        };

        serde_json::from_str(&raw).map_err(|source| MarketDataError::Deserialization {
            symbol: symbol.to_string(),
            source,
        })
    }
}

#[async_trait]
impl MarketDataSource for FileMarketData {
    async fn fetch_instrument(&self, symbol: &str) -> Result<InstrumentData, MarketDataError> {
        let payload: InstrumentPayload =
            self.read_json(symbol, self.instrument_path(symbol)).await?;
        let data = payload.into_instrument_data(symbol)?;
        tracing::debug!(
            symbol,
            observations = data.history.len(),
            has_statement = data.statement.is_some(),
            "Loaded instrument payload."
        );
        Ok(data)
    }

    async fn fetch_company_info(&self, symbol: &str) -> Result<CompanyInfo, MarketDataError> {
        self.read_json(symbol, self.info_path(symbol)).await
    }
}
