use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::performance::ValuationPoint;

/// Derived metrics for one calendar day, one per net-worth mark date.
///
/// The snapshot series is the authoritative output artifact: append-only,
/// ordered by date, and read-only to consumers. `twrr` is the cumulative
/// time-weighted return from the first snapshot, precomputed during
/// construction so the default whole-history view is an O(1) read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySnapshot {
    pub date: NaiveDate,
    pub net_worth: f64,
    pub contribution: f64,
    pub twrr: f64,
    pub net_gain: f64,
    pub holdings_value_by_ticker: HashMap<String, f64>,
    pub holdings_weight_by_ticker: HashMap<String, f64>,
    pub return_percent_by_ticker: HashMap<String, Option<f64>>,
}

impl DailySnapshot {
    /// Tickers ordered for display: descending weight, ties alphabetical.
    pub fn tickers_by_weight(&self) -> Vec<String> {
        let mut tickers: Vec<&String> = self.holdings_weight_by_ticker.keys().collect();
        tickers.sort_by(|a, b| {
            let weight_a = self.holdings_weight_by_ticker.get(*a).copied().unwrap_or(0.0);
            let weight_b = self.holdings_weight_by_ticker.get(*b).copied().unwrap_or(0.0);
            weight_b
                .partial_cmp(&weight_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.cmp(b))
        });
        tickers.into_iter().cloned().collect()
    }
}

impl ValuationPoint for DailySnapshot {
    fn net_worth(&self) -> f64 {
        self.net_worth
    }
    fn contribution(&self) -> f64 {
        self.contribution
    }
}

/// The persisted shape of one series day: what `networth.json` and
/// `contributions.json` together record for a date. Also serves as the
/// anchor a series extension resumes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub net_worth: f64,
    pub contribution: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, net_worth: f64, contribution: f64) -> Self {
        SeriesPoint {
            date,
            net_worth,
            contribution,
        }
    }
}

impl ValuationPoint for SeriesPoint {
    fn net_worth(&self) -> f64 {
        self.net_worth
    }
    fn contribution(&self) -> f64 {
        self.contribution
    }
}

/// Which figure a caller wants to read off a snapshot series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesMetric {
    NetWorth,
    Contributions,
    Instrument(String),
}

impl SeriesMetric {
    /// Parses a caller-facing name; anything that is not one of the named
    /// series is an instrument ticker.
    pub fn parse(name: &str) -> SeriesMetric {
        match name.to_ascii_lowercase().as_str() {
            "net-worth" | "networth" | "net_worth" => SeriesMetric::NetWorth,
            "contributions" | "contribution" => SeriesMetric::Contributions,
            _ => SeriesMetric::Instrument(name.to_ascii_uppercase()),
        }
    }

    /// The metric's value on one snapshot. Instruments read their holding
    /// value, zero when the instrument was not held that day.
    pub fn value_at(&self, snapshot: &DailySnapshot) -> f64 {
        match self {
            SeriesMetric::NetWorth => snapshot.net_worth,
            SeriesMetric::Contributions => snapshot.contribution,
            SeriesMetric::Instrument(ticker) => snapshot
                .holdings_value_by_ticker
                .get(ticker)
                .copied()
                .unwrap_or(0.0),
        }
    }
}
