use chrono::NaiveDate;
use std::collections::HashMap;

use crate::errors::{Result, ValidationError};
use crate::ledger::{group_trades_by_date, tickers_from_trades, DatedValue, Trade};
use crate::performance::period_growth;
use crate::positions::PositionTracker;
use crate::pricing::PriceResolver;

use super::snapshot_model::{DailySnapshot, SeriesPoint};

/// Mutable replay state carried from one snapshot day to the next.
///
/// Owned by the caller and threaded through the build explicitly; nothing
/// in the engine lives in module-level state.
#[derive(Debug)]
pub struct SeriesBuilderState {
    tracker: PositionTracker,
    last_known_contribution: f64,
    cumulative_growth: f64,
    previous: Option<SeriesPoint>,
}

impl Default for SeriesBuilderState {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesBuilderState {
    pub fn new() -> Self {
        SeriesBuilderState {
            tracker: PositionTracker::new(),
            last_known_contribution: 0.0,
            cumulative_growth: 1.0,
            previous: None,
        }
    }

    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    /// Advances the state through one net-worth mark date and emits its
    /// snapshot.
    fn snapshot_for_day(
        &mut self,
        date: NaiveDate,
        net_worth: f64,
        trades_today: &[Trade],
        contribution_sample: Option<f64>,
        tickers: &[String],
        resolver: &PriceResolver,
    ) -> DailySnapshot {
        for trade in trades_today {
            let price = resolver.price_as_of(&trade.ticker, trade.date);
            self.tracker.apply_trade(trade, price);
        }

        let mut value_by_ticker: HashMap<String, f64> = HashMap::new();
        let mut return_by_ticker: HashMap<String, Option<f64>> = HashMap::new();
        let mut total_holdings_value = 0.0;
        for ticker in tickers {
            let price = resolver.price_as_of(ticker, date);
            let position = self.tracker.position(ticker);
            let value = position.map(|p| p.market_value(price)).unwrap_or(0.0);
            total_holdings_value += value;
            value_by_ticker.insert(ticker.clone(), value);
            return_by_ticker.insert(
                ticker.clone(),
                position.and_then(|p| p.total_return_percent(price)),
            );
        }

        let mut weight_by_ticker: HashMap<String, f64> = HashMap::new();
        for ticker in tickers {
            let value = value_by_ticker.get(ticker).copied().unwrap_or(0.0);
            let weight = if total_holdings_value > 0.0 {
                value / total_holdings_value * 100.0
            } else {
                0.0
            };
            weight_by_ticker.insert(ticker.clone(), weight);
        }

        if let Some(sample) = contribution_sample {
            self.last_known_contribution = sample;
        }
        let contribution = self.last_known_contribution;
        let net_gain = net_worth - contribution;

        let current = SeriesPoint::new(date, net_worth, contribution);
        if let Some(previous) = &self.previous {
            self.cumulative_growth *= period_growth(previous, &current);
        }
        self.previous = Some(current);

        DailySnapshot {
            date,
            net_worth,
            contribution,
            twrr: (self.cumulative_growth - 1.0) * 100.0,
            net_gain,
            holdings_value_by_ticker: value_by_ticker,
            holdings_weight_by_ticker: weight_by_ticker,
            return_percent_by_ticker: return_by_ticker,
        }
    }
}

/// Builds the full snapshot series from raw inputs.
///
/// One snapshot per net-worth mark date, in mark order. Trades may arrive
/// unsorted; they are grouped by date and applied on their own day before
/// that day's valuation. Contribution samples are sparse and forward-fill.
///
/// The only fatal input is an empty mark series: with no dates there is
/// nothing to build. Every other gap degrades to a neutral value.
pub fn build_snapshot_series(
    net_worth_marks: &[DatedValue],
    contributions: &[DatedValue],
    trades: Vec<Trade>,
    resolver: &PriceResolver,
) -> Result<Vec<DailySnapshot>> {
    if net_worth_marks.is_empty() {
        return Err(ValidationError::EmptySeries("net worth marks").into());
    }

    let tickers = tickers_from_trades(&trades);
    let trades_by_date = group_trades_by_date(trades);
    let contributions_by_date: HashMap<NaiveDate, f64> = contributions
        .iter()
        .map(|sample| (sample.date, sample.value))
        .collect();

    let mut state = SeriesBuilderState::new();
    let mut snapshots = Vec::with_capacity(net_worth_marks.len());
    for mark in net_worth_marks {
        let trades_today = trades_by_date
            .get(&mark.date)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let snapshot = state.snapshot_for_day(
            mark.date,
            mark.value,
            trades_today,
            contributions_by_date.get(&mark.date).copied(),
            &tickers,
            resolver,
        );
        snapshots.push(snapshot);
    }

    Ok(snapshots)
}
