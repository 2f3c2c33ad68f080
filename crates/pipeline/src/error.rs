use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Market data error: {0}")]
    MarketData(#[from] market_data::MarketDataError),

    #[error("Storage error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Instrument task for {0} did not complete: {1}")]
    Task(String, String),

    #[error("Progress bar template error: {0}")]
    ProgressBarTemplate(String),
}

impl From<indicatif::style::TemplateError> for PipelineError {
    fn from(error: indicatif::style::TemplateError) -> Self {
        PipelineError::ProgressBarTemplate(error.to_string())
    }
}
