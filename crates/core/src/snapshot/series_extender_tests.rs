use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::ledger::{Trade, TradeSide};
use crate::pricing::{PricePoint, PriceResolver};
use crate::snapshot::{extend_snapshot_series, ExtendOutcome, SeriesPoint};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn trade(d: &str, ticker: &str, side: TradeSide, amount: f64) -> Trade {
    Trade {
        date: date(d),
        ticker: ticker.to_string(),
        side,
        amount,
    }
}

fn resolver() -> PriceResolver {
    let mut histories = HashMap::new();
    histories.insert(
        "AAPL".to_string(),
        vec![
            PricePoint::new(date("2024-01-02"), 10.0),
            PricePoint::new(date("2024-01-05"), 11.0),
        ],
    );
    histories.insert(
        "VFV".to_string(),
        vec![PricePoint::new(date("2024-01-02"), 50.0)],
    );
    PriceResolver::from_histories(histories)
}

fn ledger() -> Vec<Trade> {
    vec![
        // Out of order on purpose; the extender sorts before replay.
        trade("2024-01-05", "AAPL", TradeSide::Sell, 550.0),
        trade("2024-01-02", "AAPL", TradeSide::Buy, 1000.0),
        trade("2024-01-02", "VFV", TradeSide::Buy, 500.0),
    ]
}

fn anchor() -> SeriesPoint {
    SeriesPoint::new(date("2024-01-03"), 1500.0, 1500.0)
}

#[test]
fn appends_one_row_per_new_day() {
    let increments = BTreeMap::new();
    let outcome = extend_snapshot_series(
        anchor(),
        ledger(),
        &increments,
        &resolver(),
        date("2024-01-05"),
    );

    let ExtendOutcome::Appended(rows) = outcome else {
        panic!("expected appended rows");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, date("2024-01-04"));
    assert_eq!(rows[1].date, date("2024-01-05"));

    // Jan 4: baseline holdings only (100 AAPL @ 10, 10 VFV @ 50).
    assert_eq!(rows[0].net_worth, 1500.0);
    assert_eq!(rows[0].contribution, 1500.0);

    // Jan 5: sell $550 of AAPL at $11 leaves 50 shares.
    assert_eq!(rows[1].net_worth, 50.0 * 11.0 + 500.0);
    assert_eq!(rows[1].contribution, 1500.0);
}

#[test]
fn contribution_increments_accumulate_into_the_running_total() {
    let mut increments = BTreeMap::new();
    increments.insert(date("2024-01-04"), 200.0);
    increments.insert(date("2024-01-05"), 50.0);

    let outcome = extend_snapshot_series(
        anchor(),
        ledger(),
        &increments,
        &resolver(),
        date("2024-01-05"),
    );

    let ExtendOutcome::Appended(rows) = outcome else {
        panic!("expected appended rows");
    };
    assert_eq!(rows[0].contribution, 1700.0);
    assert_eq!(rows[1].contribution, 1750.0);
}

#[test]
fn already_up_to_date_when_anchor_reaches_through_date() {
    let increments = BTreeMap::new();
    let outcome = extend_snapshot_series(
        anchor(),
        ledger(),
        &increments,
        &resolver(),
        date("2024-01-03"),
    );
    assert_eq!(outcome, ExtendOutcome::UpToDate);

    let outcome = extend_snapshot_series(
        anchor(),
        ledger(),
        &increments,
        &resolver(),
        date("2024-01-01"),
    );
    assert_eq!(outcome, ExtendOutcome::UpToDate);
}

#[test]
fn rerunning_the_same_range_is_idempotent() {
    let mut increments = BTreeMap::new();
    increments.insert(date("2024-01-04"), 200.0);

    let first = extend_snapshot_series(
        anchor(),
        ledger(),
        &increments,
        &resolver(),
        date("2024-01-06"),
    );
    let second = extend_snapshot_series(
        anchor(),
        ledger(),
        &increments,
        &resolver(),
        date("2024-01-06"),
    );
    assert_eq!(first, second);
}

#[test]
fn appended_rows_are_rounded_to_cents() {
    // $1000 at $3 buys 333.33... shares; marked at $3.01 that is
    // 1003.333..., which must persist as 1003.33 (cent precision).
    let mut histories = HashMap::new();
    histories.insert(
        "AAPL".to_string(),
        vec![
            PricePoint::new(date("2024-01-02"), 3.0),
            PricePoint::new(date("2024-01-04"), 3.01),
        ],
    );
    let resolver = PriceResolver::from_histories(histories);
    let trades = vec![trade("2024-01-02", "AAPL", TradeSide::Buy, 1000.0)];
    let anchor = SeriesPoint::new(date("2024-01-03"), 1000.0, 1000.0);

    let outcome = extend_snapshot_series(
        anchor,
        trades,
        &BTreeMap::new(),
        &resolver,
        date("2024-01-04"),
    );
    let ExtendOutcome::Appended(rows) = outcome else {
        panic!("expected appended rows");
    };
    assert_eq!(rows[0].net_worth, 1003.33);
}

#[test]
fn baseline_replay_prices_trades_at_their_own_dates() {
    // A buy before the anchor must be priced at its trade date, not at the
    // anchor date, to reconstruct the right share count.
    let mut histories = HashMap::new();
    histories.insert(
        "AAPL".to_string(),
        vec![
            PricePoint::new(date("2024-01-02"), 10.0),
            PricePoint::new(date("2024-01-03"), 20.0),
        ],
    );
    let resolver = PriceResolver::from_histories(histories);
    let trades = vec![trade("2024-01-02", "AAPL", TradeSide::Buy, 1000.0)];
    let anchor = SeriesPoint::new(date("2024-01-03"), 2000.0, 1000.0);

    let outcome = extend_snapshot_series(
        anchor,
        trades,
        &BTreeMap::new(),
        &resolver,
        date("2024-01-04"),
    );
    let ExtendOutcome::Appended(rows) = outcome else {
        panic!("expected appended rows");
    };
    // 100 shares (bought at $10), still marked at $20.
    assert_eq!(rows[0].net_worth, 2000.0);
}

#[test]
fn trades_without_price_data_leave_the_series_unchanged() {
    let trades = vec![trade("2024-01-04", "GHOST", TradeSide::Buy, 1000.0)];
    let anchor = SeriesPoint::new(date("2024-01-03"), 0.0, 1000.0);

    let outcome = extend_snapshot_series(
        anchor,
        trades,
        &BTreeMap::new(),
        &PriceResolver::new(),
        date("2024-01-04"),
    );
    let ExtendOutcome::Appended(rows) = outcome else {
        panic!("expected appended rows");
    };
    assert_eq!(rows[0].net_worth, 0.0);
    assert_eq!(rows[0].contribution, 1000.0);
}
