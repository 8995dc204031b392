use std::collections::HashMap;

/// Which vendor serves tickers that are not routed to Alpha Vantage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Tiingo,
    Fmp,
}

pub const PRICE_SOURCE: PriceSource = PriceSource::Tiingo;

/// Toronto-listed tickers the default vendor cannot serve.
pub const ALPHA_VANTAGE_TICKERS: &[&str] = &["NA", "XBAL", "VFV", "QQU", "HUG", "XEQT"];

/// Vendor symbols for the Alpha Vantage tickers.
pub fn alpha_vantage_symbol_overrides() -> HashMap<String, String> {
    ALPHA_VANTAGE_TICKERS
        .iter()
        .map(|ticker| (ticker.to_string(), format!("{}.TRT", ticker)))
        .collect()
}

pub fn tiingo_token() -> Option<String> {
    env_key("TIINGO_TOKEN")
}

pub fn fmp_api_key() -> Option<String> {
    env_key("FMP_API_KEY")
}

pub fn alpha_vantage_api_key() -> Option<String> {
    env_key("ALPHA_VANTAGE_API_KEY")
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
