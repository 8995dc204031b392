mod alpha_vantage_provider;
mod fmp_provider;
mod tiingo_provider;

pub use alpha_vantage_provider::AlphaVantageProvider;
pub use fmp_provider::FmpProvider;
pub use tiingo_provider::TiingoProvider;
