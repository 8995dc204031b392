use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use folioscout_core::ledger::{DatedValue, Trade};
use folioscout_core::pricing::PricePoint;

use crate::errors::{Result, StorageError};

const NET_WORTH_FILE: &str = "networth.json";
const CONTRIBUTIONS_FILE: &str = "contributions.json";
const INDIVIDUAL_CONTRIBUTIONS_FILE: &str = "individualContributions.json";
const TRADES_FILE: &str = "trades.json";
const PRICE_HISTORY_DIR: &str = "stockPriceHistory";
const PRICE_UPDATE_META_FILE: &str = "_last_update.json";

/// Record of the last completed price refresh, used to skip a second run
/// on the same trading day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdateMeta {
    pub date_str: String,
    pub updated_tickers: usize,
    pub attempted_tickers: usize,
}

/// Handle on one data directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DataStore {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn price_history_dir(&self) -> PathBuf {
        self.data_dir.join(PRICE_HISTORY_DIR)
    }

    fn price_history_path(&self, ticker: &str) -> PathBuf {
        self.price_history_dir().join(format!("{}.json", ticker))
    }

    // --- Series files ---

    /// Net-worth marks, one `[date, value]` row per sampled day.
    /// The file is required; a missing or unreadable file is fatal.
    pub fn load_net_worth(&self) -> Result<Vec<DatedValue>> {
        self.load_series(&self.data_dir.join(NET_WORTH_FILE))
    }

    /// Cumulative-contribution samples, same row shape as net worth.
    pub fn load_contributions(&self) -> Result<Vec<DatedValue>> {
        self.load_series(&self.data_dir.join(CONTRIBUTIONS_FILE))
    }

    pub fn save_net_worth(&self, rows: &[DatedValue]) -> Result<()> {
        self.save_series(&self.data_dir.join(NET_WORTH_FILE), rows)
    }

    pub fn save_contributions(&self, rows: &[DatedValue]) -> Result<()> {
        self.save_series(&self.data_dir.join(CONTRIBUTIONS_FILE), rows)
    }

    /// Per-day deposit increments, summed per date. Optional file: absent
    /// means no increments.
    pub fn load_contribution_increments(&self) -> Result<BTreeMap<NaiveDate, f64>> {
        let path = self.data_dir.join(INDIVIDUAL_CONTRIBUTIONS_FILE);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let mut increments = BTreeMap::new();
        for row in self.load_series(&path)? {
            *increments.entry(row.date).or_insert(0.0) += row.value;
        }
        Ok(increments)
    }

    fn load_series(&self, path: &Path) -> Result<Vec<DatedValue>> {
        let rows: Vec<Value> = self.read_json(path)?;
        let mut series = Vec::with_capacity(rows.len());
        for row in rows {
            match parse_series_row(&row) {
                Some((date, value)) => series.push(DatedValue::new(date, value)),
                None => warn!("Dropping malformed row in {}: {}", path.display(), row),
            }
        }
        Ok(series)
    }

    /// Writes a series file in the append-friendly format: one row per
    /// line inside a plain JSON array.
    fn save_series(&self, path: &Path, rows: &[DatedValue]) -> Result<()> {
        let lines: Vec<String> = rows
            .iter()
            .map(|row| format!("[\"{}\",{}]", row.date.format("%Y-%m-%d"), row.value))
            .collect();
        let output = format!("[\n{}\n]\n", lines.join(",\n"));
        fs::write(path, output).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    // --- Trade ledger ---

    /// The trade ledger. Rows that do not deserialize (bad date, unknown
    /// side, non-numeric amount) are dropped, not fatal.
    pub fn load_trades(&self) -> Result<Vec<Trade>> {
        let path = self.data_dir.join(TRADES_FILE);
        let rows: Vec<Value> = self.read_json(&path)?;
        let mut trades = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<Trade>(row.clone()) {
                Ok(trade) if trade.amount.is_finite() => trades.push(trade),
                _ => warn!("Dropping malformed trade in {}: {}", path.display(), row),
            }
        }
        Ok(trades)
    }

    // --- Price histories ---

    /// Loads the price file for every ticker that has one. Instruments
    /// without a file simply have no data; the engine values them at zero.
    pub fn load_price_histories(&self, tickers: &[String]) -> HashMap<String, Vec<PricePoint>> {
        let mut histories = HashMap::new();
        for ticker in tickers {
            let path = self.price_history_path(ticker);
            if !path.exists() {
                continue;
            }
            match self.load_price_rows(&path) {
                Ok(points) => {
                    histories.insert(ticker.clone(), points);
                }
                Err(e) => warn!("Skipping price history for {}: {}", ticker, e),
            }
        }
        histories
    }

    fn load_price_rows(&self, path: &Path) -> Result<Vec<PricePoint>> {
        let rows: Vec<Value> = self.read_json(path)?;
        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            match parse_series_row(&row) {
                Some((date, price)) => points.push(PricePoint::new(date, price)),
                None => warn!("Dropping malformed row in {}: {}", path.display(), row),
            }
        }
        Ok(points)
    }

    /// Date of the last stored row for a ticker, if any. Rows are stored
    /// sorted, so this is the file's final entry.
    pub fn last_price_date(&self, ticker: &str) -> Option<NaiveDate> {
        let path = self.price_history_path(ticker);
        if !path.exists() {
            return None;
        }
        match self.load_price_rows(&path) {
            Ok(points) => points.last().map(|p| p.date),
            Err(_) => None,
        }
    }

    /// Merges freshly fetched rows into a ticker's price file: new dates
    /// are added, overlapping dates take the new value, and the whole file
    /// is rewritten sorted. Returns the total row count.
    pub fn merge_price_history(&self, ticker: &str, fresh: &[PricePoint]) -> Result<usize> {
        let dir = self.price_history_dir();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Write {
            path: dir.clone(),
            source,
        })?;

        let path = self.price_history_path(ticker);
        let mut merged: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        if path.exists() {
            for point in self.load_price_rows(&path)? {
                merged.insert(point.date, point.price);
            }
        }
        for point in fresh {
            merged.insert(point.date, point.price);
        }

        let mut lines = Vec::with_capacity(merged.len() + 2);
        lines.push("[".to_string());
        let total = merged.len();
        for (i, (date, price)) in merged.iter().enumerate() {
            let comma = if i + 1 == total { "" } else { "," };
            lines.push(format!(
                "  [\"{}\",{}]{}",
                date.format("%Y-%m-%d"),
                price,
                comma
            ));
        }
        lines.push("]".to_string());
        fs::write(&path, lines.join("\n") + "\n").map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(total)
    }

    // --- Refresh metadata ---

    /// Last refresh record; `None` when absent or unreadable.
    pub fn load_update_meta(&self) -> Option<PriceUpdateMeta> {
        let path = self.price_history_dir().join(PRICE_UPDATE_META_FILE);
        let text = fs::read_to_string(path).ok()?;
        serde_json::from_str(&text).ok()
    }

    pub fn save_update_meta(&self, meta: &PriceUpdateMeta) -> Result<()> {
        let dir = self.price_history_dir();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Write {
            path: dir.clone(),
            source,
        })?;
        let path = dir.join(PRICE_UPDATE_META_FILE);
        let text = serde_json::to_string_pretty(meta).map_err(|source| StorageError::Parse {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, text + "\n").map_err(|source| StorageError::Write {
            path,
            source,
        })
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StorageError::MissingFile(path.to_path_buf())
            } else {
                StorageError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&text).map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A valid series row is `["YYYY-MM-DD", <finite number>]`.
fn parse_series_row(row: &Value) -> Option<(NaiveDate, f64)> {
    let entries = row.as_array()?;
    if entries.len() != 2 {
        return None;
    }
    let date: NaiveDate = entries[0].as_str()?.parse().ok()?;
    let value = entries[1].as_f64()?;
    if !value.is_finite() {
        return None;
    }
    Some((date, value))
}
