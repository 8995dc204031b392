use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::provider::PriceHistoryProvider;

/// Pause between consecutive requests to the default vendor.
const DEFAULT_PACING: Duration = Duration::from_millis(250);

/// Pause after an Alpha Vantage request. The free tier allows a handful of
/// requests per minute, so the loop has to crawl.
const ALPHA_VANTAGE_PACING: Duration = Duration::from_secs(13);

/// The provider and vendor-specific symbol chosen for one ticker.
pub struct ProviderRoute {
    pub provider: Arc<dyn PriceHistoryProvider>,
    pub symbol: String,
    pub pacing: Duration,
}

impl std::fmt::Debug for ProviderRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRoute")
            .field("provider", &self.provider.id())
            .field("symbol", &self.symbol)
            .field("pacing", &self.pacing)
            .finish()
    }
}

/// Routes each ticker to a vendor.
///
/// Most tickers go to the default vendor under their own symbol. A
/// configured subset routes to Alpha Vantage under a per-ticker symbol
/// override (exchange-suffixed listings the default vendor cannot serve).
pub struct ProviderRegistry {
    default_provider: Arc<dyn PriceHistoryProvider>,
    alpha_vantage: Option<Arc<dyn PriceHistoryProvider>>,
    alpha_vantage_tickers: HashSet<String>,
    symbol_overrides: HashMap<String, String>,
}

impl ProviderRegistry {
    pub fn new(default_provider: Arc<dyn PriceHistoryProvider>) -> Self {
        ProviderRegistry {
            default_provider,
            alpha_vantage: None,
            alpha_vantage_tickers: HashSet::new(),
            symbol_overrides: HashMap::new(),
        }
    }

    /// Declares which tickers must be served by Alpha Vantage. A ticker
    /// without an explicit symbol override maps to `<TICKER>.TRT`.
    pub fn with_alpha_vantage_routing(
        mut self,
        tickers: impl IntoIterator<Item = String>,
        symbol_overrides: HashMap<String, String>,
    ) -> Self {
        self.alpha_vantage_tickers = tickers
            .into_iter()
            .map(|t| t.to_ascii_uppercase())
            .collect();
        self.symbol_overrides = symbol_overrides;
        self
    }

    /// Supplies the Alpha Vantage provider. Without it, routed tickers
    /// fail with a missing-credential error instead of a wrong vendor.
    pub fn with_alpha_vantage_provider(mut self, provider: Arc<dyn PriceHistoryProvider>) -> Self {
        self.alpha_vantage = Some(provider);
        self
    }

    fn uses_alpha_vantage(&self, ticker: &str) -> bool {
        self.alpha_vantage_tickers
            .contains(&ticker.to_ascii_uppercase())
    }

    /// Picks the provider, vendor symbol, and pacing for a ticker.
    pub fn route(&self, ticker: &str) -> Result<ProviderRoute, MarketDataError> {
        if self.uses_alpha_vantage(ticker) {
            let provider = self.alpha_vantage.clone().ok_or_else(|| {
                MarketDataError::MissingCredential(format!(
                    "ticker {} requires Alpha Vantage but no API key is configured",
                    ticker
                ))
            })?;
            let symbol = self
                .symbol_overrides
                .get(ticker)
                .cloned()
                .unwrap_or_else(|| format!("{}.TRT", ticker));
            return Ok(ProviderRoute {
                provider,
                symbol,
                pacing: ALPHA_VANTAGE_PACING,
            });
        }
        Ok(ProviderRoute {
            provider: self.default_provider.clone(),
            symbol: ticker.to_string(),
            pacing: DEFAULT_PACING,
        })
    }
}
