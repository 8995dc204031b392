//! Pricing module - date-indexed price histories with as-of lookup.

mod price_model;
mod price_resolver;

pub use price_model::{PriceHistory, PriceIndex, PricePoint};
pub use price_resolver::PriceResolver;
