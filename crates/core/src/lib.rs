//! Folioscout Core - portfolio snapshot and return engine.
//!
//! This crate replays a date-ordered trade ledger against sparse price
//! histories to produce a daily series of valuation, contribution-adjusted
//! gain, and time-weighted return, plus per-holding position accounting.
//! It performs no I/O: callers load the ledger and price data (see the
//! `storage-json` crate) and supply every date explicitly.

pub mod constants;
pub mod errors;
pub mod ledger;
pub mod performance;
pub mod positions;
pub mod pricing;
pub mod snapshot;
pub mod utils;

// Re-export the primary entry points
pub use snapshot::{build_snapshot_series, extend_snapshot_series};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
