//! Ledger module - the externally supplied trade and cash-flow record.

mod ledger_model;

pub use ledger_model::{
    group_trades_by_date, sort_trades_by_date, tickers_from_trades, ContributionEvent, DatedValue,
    Trade, TradeSide,
};
