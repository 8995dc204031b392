/// Share balances at or below this threshold are treated as fully exited.
/// Avoids floating-point dust keeping tiny positions "open" after a sale.
pub const SHARE_EPSILON: f64 = 1e-6;

/// Total-return percents with a magnitude below this are indistinguishable
/// from "never held"; holdings views use it to hide fully-exited positions.
pub const RETURN_DISPLAY_EPSILON: f64 = 1e-9;

/// Decimal places used when appending persisted series records.
pub const SERIES_CENT_PRECISION: u32 = 2;
