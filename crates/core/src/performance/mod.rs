//! Performance module - chained time-weighted rate of return.

mod twrr;

pub use twrr::{period_growth, time_weighted_return, ValuationPoint};
