use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use crate::errors::ValidationError;

/// Direction of a trade as recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

impl FromStr for TradeSide {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TradeSide::Buy),
            "SELL" => Ok(TradeSide::Sell),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown trade side: {}",
                other
            ))),
        }
    }
}

/// One ledger entry: a currency amount exchanged for shares of an
/// instrument on a calendar day. `amount` is a positive magnitude for both
/// sides; for a SELL it is the proceeds of the sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub ticker: String,
    pub side: TradeSide,
    pub amount: f64,
}

/// A `(date, value)` sample of an externally supplied series, such as a
/// net-worth mark or a cumulative-contribution reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

impl DatedValue {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        DatedValue { date, value }
    }
}

/// A sample of the running total of net external cash deposited. Days
/// without a sample inherit the last known cumulative value.
pub type ContributionEvent = DatedValue;

/// Stable sort by date: trades on the same day keep their input order,
/// which is the tie-break rule for replay.
pub fn sort_trades_by_date(trades: &mut [Trade]) {
    trades.sort_by_key(|t| t.date);
}

/// Groups trades by calendar day, preserving input order within a day.
pub fn group_trades_by_date(trades: Vec<Trade>) -> BTreeMap<NaiveDate, Vec<Trade>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Trade>> = BTreeMap::new();
    for trade in trades {
        by_date.entry(trade.date).or_default().push(trade);
    }
    by_date
}

/// The instrument universe of a ledger: every distinct ticker, sorted.
pub fn tickers_from_trades(trades: &[Trade]) -> Vec<String> {
    let tickers: BTreeSet<&str> = trades.iter().map(|t| t.ticker.as_str()).collect();
    tickers.into_iter().map(String::from).collect()
}
