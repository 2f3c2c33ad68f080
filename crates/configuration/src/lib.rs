use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, DEFAULT_TICKERS, RiskSettings, Storage, Universe};

/// Loads the application configuration from `config.toml` in the working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Loads the application configuration from the given TOML file.
///
/// The file is optional; every section falls back to its defaults. Environment variables
/// prefixed with `STOCKDESK__` override file values, e.g. `STOCKDESK__RISK__RISK_FREE_RATE=0.05`
/// or `STOCKDESK__UNIVERSE__TICKERS=AAPL,MSFT`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("STOCKDESK")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("universe.tickers"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        path = %path.display(),
        tickers = config.universe.tickers.len(),
        "Configuration loaded."
    );

    Ok(config)
}
