use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

use crate::ledger::{sort_trades_by_date, Trade};
use crate::positions::PositionTracker;
use crate::pricing::PriceResolver;
use crate::utils::{days_between, round_cents};

use super::snapshot_model::SeriesPoint;

/// Result of a series extension run.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtendOutcome {
    /// The persisted series already reaches the requested date.
    UpToDate,
    /// New rows to append, one per calendar day, in date order.
    Appended(Vec<SeriesPoint>),
}

/// Extends a persisted snapshot series through `through` without
/// recomputing history.
///
/// Position state is reconstructed by replaying every trade dated at or
/// before the anchor; the extension may run in a different process from
/// whatever built the history, so nothing in memory is assumed. Each new
/// day then adds that day's contribution increment, applies that day's
/// trades, and marks the holdings to market. Appended rows are rounded to
/// cents, which together with the ordered replay makes a re-run over the
/// same inputs byte-identical.
///
/// The appended range is strictly after `last.date`; the caller guarantees
/// the persisted series has no rows past the anchor.
pub fn extend_snapshot_series(
    last: SeriesPoint,
    mut trades: Vec<Trade>,
    contribution_increments: &BTreeMap<NaiveDate, f64>,
    resolver: &PriceResolver,
    through: NaiveDate,
) -> ExtendOutcome {
    if last.date >= through {
        return ExtendOutcome::UpToDate;
    }

    sort_trades_by_date(&mut trades);
    let split = trades.partition_point(|t| t.date <= last.date);
    let (baseline, upcoming) = trades.split_at(split);

    let mut tracker = PositionTracker::new();
    tracker.replay(baseline.iter(), resolver);
    debug!(
        "Extension baseline at {}: holdings worth {:.2}",
        last.date,
        tracker.holdings_value(resolver, last.date)
    );

    let mut upcoming_by_date: BTreeMap<NaiveDate, Vec<&Trade>> = BTreeMap::new();
    for trade in upcoming {
        upcoming_by_date.entry(trade.date).or_default().push(trade);
    }

    let start = match last.date.succ_opt() {
        Some(day) => day,
        None => return ExtendOutcome::UpToDate,
    };

    let mut cumulative_contribution = last.contribution;
    let mut appended = Vec::new();
    for day in days_between(start, through) {
        if let Some(increment) = contribution_increments.get(&day) {
            cumulative_contribution += increment;
        }
        if let Some(trades_today) = upcoming_by_date.get(&day) {
            for trade in trades_today {
                let price = resolver.price_as_of(&trade.ticker, trade.date);
                tracker.apply_trade(trade, price);
            }
        }
        let net_worth = tracker.holdings_value(resolver, day);
        appended.push(SeriesPoint::new(
            day,
            round_cents(net_worth),
            round_cents(cumulative_contribution),
        ));
    }

    ExtendOutcome::Appended(appended)
}
