use thiserror::Error;

/// Errors that can occur while fetching price history from a vendor.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Provider returned no data for {0}")]
    NoData(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
