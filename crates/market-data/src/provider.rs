use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::DailyClose;

/// A vendor that can serve daily closing prices for one instrument.
///
/// Implementations return every available close from `start` onward,
/// ascending by date, and translate vendor-specific failure payloads into
/// `MarketDataError`. An empty result is `NoData`, not an empty `Ok`:
/// callers keep the on-disk history untouched when a fetch yields nothing.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Identifier used in logs and routing, e.g. "TIINGO".
    fn id(&self) -> &'static str;

    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<Vec<DailyClose>, MarketDataError>;
}
