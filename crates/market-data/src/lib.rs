//! Folioscout Market Data - daily closing-price providers.
//!
//! Each provider fetches one instrument's adjusted daily closes from a
//! vendor HTTP API and returns them as ascending `(date, close)` rows. The
//! registry decides which vendor serves which ticker; credentials are
//! resolved by the caller and injected at construction.

pub mod errors;
pub mod models;
pub mod provider;
pub mod providers;
pub mod registry;

pub use errors::MarketDataError;
pub use models::DailyClose;
pub use provider::PriceHistoryProvider;
pub use registry::{ProviderRegistry, ProviderRoute};

/// First date requested for an instrument with no stored history.
pub const DEFAULT_HISTORY_START: &str = "2020-01-01";

/// Days of overlap re-fetched before the last stored row, so vendor
/// revisions to recent closes are picked up on the next refresh.
pub const REFRESH_OVERLAP_DAYS: i64 = 7;
