use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap};

use crate::constants::SHARE_EPSILON;
use crate::ledger::{Trade, TradeSide};
use crate::pricing::PriceResolver;

/// Average-cost position in a single instrument.
///
/// `cost_basis` covers currently held shares only; a sale moves the
/// proportional slice of cost into `realized_cost` and the sale amount into
/// `realized_proceeds`. `shares` and `cost_basis` never go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub shares: f64,
    pub cost_basis: f64,
    pub realized_cost: f64,
    pub realized_proceeds: f64,
}

impl Position {
    pub fn new() -> Self {
        Position::default()
    }

    /// Whether the position still holds shares beyond floating-point dust.
    pub fn has_shares(&self) -> bool {
        self.shares > SHARE_EPSILON
    }

    /// Market value of the held shares, zero once the position is dust.
    pub fn market_value(&self, price: f64) -> f64 {
        if self.has_shares() {
            self.shares * price
        } else {
            0.0
        }
    }

    /// Applies one ledger trade at the given execution price.
    ///
    /// A trade without a valid positive price is skipped entirely: there is
    /// no way to know how many shares it moved, and a bad price must not
    /// corrupt the share count.
    pub fn apply_trade(&mut self, trade: &Trade, price: f64) {
        if !price.is_finite() || price <= 0.0 {
            warn!(
                "Skipping {} {} on {}: no valid price ({})",
                trade.side.as_str(),
                trade.ticker,
                trade.date,
                price
            );
            return;
        }

        let shares_delta = trade.amount / price;
        match trade.side {
            TradeSide::Buy => {
                self.shares += shares_delta;
                self.cost_basis += trade.amount;
            }
            TradeSide::Sell => {
                let shares_before = self.shares;
                if shares_before <= 0.0 {
                    // Nothing held, nothing to realize.
                    return;
                }
                let cost_per_share = self.cost_basis / shares_before;
                let shares_sold = shares_delta.min(shares_before);
                if shares_sold < shares_delta {
                    warn!(
                        "Sell of {} on {} exceeds held shares ({} > {}); clamping",
                        trade.ticker, trade.date, shares_delta, shares_before
                    );
                }
                // Prorate proceeds when the sale is clamped to what is held.
                let proceeds = if shares_delta > 0.0 {
                    trade.amount * (shares_sold / shares_delta)
                } else {
                    0.0
                };
                let sold_cost = cost_per_share * shares_sold;

                self.shares -= shares_sold;
                self.cost_basis -= sold_cost;
                self.realized_cost += sold_cost;
                self.realized_proceeds += proceeds;
            }
        }
    }

    /// Total return over everything ever put into the position: realized
    /// proceeds plus the current value of held shares, against realized
    /// plus remaining cost.
    ///
    /// `None` when there is no meaningful basis, or when shares are held
    /// but cannot be valued (no positive current price).
    pub fn total_return_percent(&self, current_price: f64) -> Option<f64> {
        let total_cost = self.realized_cost + self.cost_basis;
        if !(total_cost > 0.0) {
            return None;
        }
        if self.has_shares() && !(current_price > 0.0) {
            return None;
        }
        let current_value = self.market_value(current_price);
        let total_proceeds = self.realized_proceeds + current_value;
        Some((total_proceeds - total_cost) / total_cost * 100.0)
    }

    /// Unrealized return of the held shares against their average cost.
    /// `None` unless shares, cost basis, and current price are all positive.
    pub fn average_share_return_percent(&self, current_price: f64) -> Option<f64> {
        if !(self.shares > 0.0) || !(self.cost_basis > 0.0) || !(current_price > 0.0) {
            return None;
        }
        let average_cost = self.cost_basis / self.shares;
        if !(average_cost > 0.0) {
            return None;
        }
        Some((current_price - average_cost) / average_cost * 100.0)
    }
}

/// All positions of the portfolio, keyed by ticker.
///
/// Ordered by ticker so that replays and valuations iterate in a stable
/// order; series extension depends on bit-for-bit reproducible sums.
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    positions: BTreeMap<String, Position>,
}

impl PositionTracker {
    pub fn new() -> Self {
        PositionTracker::default()
    }

    pub fn position(&self, ticker: &str) -> Option<&Position> {
        self.positions.get(ticker)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Position> {
        self.positions.iter()
    }

    /// Applies a trade to the instrument's position, creating it on first
    /// touch. Invalid-price trades still create the entry but leave it
    /// empty, matching a skipped trade.
    pub fn apply_trade(&mut self, trade: &Trade, price: f64) {
        self.positions
            .entry(trade.ticker.clone())
            .or_default()
            .apply_trade(trade, price);
    }

    /// Replays trades in the given order, pricing each at its own date.
    /// Callers sort the ledger first; replay order is load-bearing.
    pub fn replay<'a, I>(&mut self, trades: I, resolver: &PriceResolver)
    where
        I: IntoIterator<Item = &'a Trade>,
    {
        for trade in trades {
            let price = resolver.price_as_of(&trade.ticker, trade.date);
            self.apply_trade(trade, price);
        }
    }

    /// Market value of every held position on the given day.
    pub fn holdings_value(&self, resolver: &PriceResolver, date: chrono::NaiveDate) -> f64 {
        let mut total = 0.0;
        for (ticker, position) in &self.positions {
            if position.has_shares() {
                total += position.market_value(resolver.price_as_of(ticker, date));
            }
        }
        total
    }
}
