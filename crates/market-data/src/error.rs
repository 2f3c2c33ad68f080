use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("No market data available for {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize the payload for {symbol}: {source}")]
    Deserialization {
        symbol: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid data format for {0}: {1}")]
    InvalidData(String, String),
}
