//! Positions module - average-cost position accounting per instrument.

mod positions_model;

pub use positions_model::{Position, PositionTracker};
