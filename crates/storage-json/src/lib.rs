//! Folioscout Storage - the on-disk JSON data directory.
//!
//! The layout is a plain directory of JSON files: the persisted series
//! (`networth.json`, `contributions.json`), the trade ledger
//! (`trades.json`), per-day deposit increments
//! (`individualContributions.json`), and one price-history file per
//! instrument under `stockPriceHistory/`. Readers drop malformed rows
//! instead of failing the batch; writers reproduce the line-per-row array
//! format so appends show up as minimal diffs.

mod data_store;
#[cfg(test)]
mod data_store_tests;
mod errors;

pub use data_store::{DataStore, PriceUpdateMeta};
pub use errors::{Result, StorageError};
