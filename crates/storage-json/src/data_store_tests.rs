use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;

use folioscout_core::ledger::{DatedValue, TradeSide};
use folioscout_core::pricing::PricePoint;

use crate::{DataStore, PriceUpdateMeta, StorageError};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn store() -> (TempDir, DataStore) {
    let dir = TempDir::new().unwrap();
    let store = DataStore::new(dir.path());
    (dir, store)
}

#[test]
fn series_round_trips_in_line_per_row_format() {
    let (_dir, store) = store();
    let rows = vec![
        DatedValue::new(date("2024-01-02"), 1500.0),
        DatedValue::new(date("2024-01-03"), 1520.55),
    ];
    store.save_net_worth(&rows).unwrap();

    let written = fs::read_to_string(store.data_dir().join("networth.json")).unwrap();
    assert_eq!(
        written,
        "[\n[\"2024-01-02\",1500],\n[\"2024-01-03\",1520.55]\n]\n"
    );

    assert_eq!(store.load_net_worth().unwrap(), rows);
}

#[test]
fn malformed_series_rows_are_dropped_not_fatal() {
    let (_dir, store) = store();
    fs::write(
        store.data_dir().join("contributions.json"),
        r#"[
["2024-01-02",100],
["not-a-date",200],
["2024-01-03","not-a-number"],
["2024-01-04"],
["2024-01-05",300]
]"#,
    )
    .unwrap();

    let rows = store.load_contributions().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].value, 100.0);
    assert_eq!(rows[1].date, date("2024-01-05"));
}

#[test]
fn missing_required_series_file_is_an_error() {
    let (_dir, store) = store();
    assert!(matches!(
        store.load_net_worth(),
        Err(StorageError::MissingFile(_))
    ));
}

#[test]
fn trades_load_and_malformed_rows_are_dropped() {
    let (_dir, store) = store();
    fs::write(
        store.data_dir().join("trades.json"),
        r#"[
{"date":"2024-01-02","ticker":"AAPL","side":"BUY","amount":1000},
{"date":"2024-01-03","ticker":"AAPL","side":"HOLD","amount":10},
{"date":"bad","ticker":"AAPL","side":"SELL","amount":10},
{"date":"2024-01-04","ticker":"VFV","side":"SELL","amount":250.5}
]"#,
    )
    .unwrap();

    let trades = store.load_trades().unwrap();
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].side, TradeSide::Buy);
    assert_eq!(trades[1].ticker, "VFV");
    assert_eq!(trades[1].amount, 250.5);
}

#[test]
fn contribution_increments_sum_per_day_and_default_empty() {
    let (_dir, store) = store();
    assert!(store.load_contribution_increments().unwrap().is_empty());

    fs::write(
        store.data_dir().join("individualContributions.json"),
        r#"[
["2024-01-02",100],
["2024-01-02",50],
["2024-01-05",25]
]"#,
    )
    .unwrap();

    let increments = store.load_contribution_increments().unwrap();
    assert_eq!(increments.len(), 2);
    assert_eq!(increments[&date("2024-01-02")], 150.0);
    assert_eq!(increments[&date("2024-01-05")], 25.0);
}

#[test]
fn price_histories_skip_missing_tickers() {
    let (_dir, store) = store();
    fs::create_dir_all(store.data_dir().join("stockPriceHistory")).unwrap();
    fs::write(
        store.data_dir().join("stockPriceHistory/AAPL.json"),
        "[\n  [\"2024-01-02\",184.29],\n  [\"2024-01-03\",185.64]\n]\n",
    )
    .unwrap();

    let histories =
        store.load_price_histories(&["AAPL".to_string(), "MISSING".to_string()]);
    assert_eq!(histories.len(), 1);
    assert_eq!(histories["AAPL"].len(), 2);
    assert_eq!(histories["AAPL"][0].price, 184.29);

    assert_eq!(store.last_price_date("AAPL"), Some(date("2024-01-03")));
    assert_eq!(store.last_price_date("MISSING"), None);
}

#[test]
fn merge_price_history_overwrites_overlap_and_sorts() {
    let (_dir, store) = store();
    store
        .merge_price_history(
            "AAPL",
            &[
                PricePoint::new(date("2024-01-03"), 185.0),
                PricePoint::new(date("2024-01-02"), 184.0),
            ],
        )
        .unwrap();

    // Second fetch revises the 3rd and extends to the 4th.
    let total = store
        .merge_price_history(
            "AAPL",
            &[
                PricePoint::new(date("2024-01-03"), 185.64),
                PricePoint::new(date("2024-01-04"), 186.0),
            ],
        )
        .unwrap();
    assert_eq!(total, 3);

    let written =
        fs::read_to_string(store.data_dir().join("stockPriceHistory/AAPL.json")).unwrap();
    assert_eq!(
        written,
        "[\n  [\"2024-01-02\",184],\n  [\"2024-01-03\",185.64],\n  [\"2024-01-04\",186]\n]\n"
    );
}

#[test]
fn update_meta_round_trips_with_camel_case_keys() {
    let (_dir, store) = store();
    assert!(store.load_update_meta().is_none());

    let meta = PriceUpdateMeta {
        date_str: "2024-01-05".to_string(),
        updated_tickers: 3,
        attempted_tickers: 4,
    };
    store.save_update_meta(&meta).unwrap();

    let written = fs::read_to_string(
        store
            .data_dir()
            .join("stockPriceHistory/_last_update.json"),
    )
    .unwrap();
    assert!(written.contains("\"dateStr\": \"2024-01-05\""));
    assert!(written.contains("\"updatedTickers\": 3"));

    assert_eq!(store.load_update_meta(), Some(meta));
}
