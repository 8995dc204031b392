//! Snapshot module - the daily snapshot series and its builders.

mod series_extender;
mod snapshot_builder;
mod snapshot_model;

#[cfg(test)]
mod series_extender_tests;

pub use series_extender::{extend_snapshot_series, ExtendOutcome};
pub use snapshot_builder::{build_snapshot_series, SeriesBuilderState};
pub use snapshot_model::{DailySnapshot, SeriesMetric, SeriesPoint};
