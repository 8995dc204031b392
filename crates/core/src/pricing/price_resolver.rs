use chrono::NaiveDate;
use std::collections::HashMap;

use super::price_model::{PriceHistory, PriceIndex, PricePoint};

/// Read-only price store for the whole instrument universe.
///
/// Populated once from loaded histories, then queried one instrument per
/// snapshot day. An instrument with no data at or before the queried date
/// resolves to `0.0`: historical gaps are expected and must not halt a
/// series build, so the missing value propagates as a zero-valued holding.
#[derive(Debug, Default)]
pub struct PriceResolver {
    histories: HashMap<String, PriceHistory>,
}

impl PriceResolver {
    pub fn new() -> Self {
        PriceResolver {
            histories: HashMap::new(),
        }
    }

    /// Builds a resolver from raw per-instrument rows, typically straight
    /// from the price-history files on disk.
    pub fn from_histories(histories: HashMap<String, Vec<PricePoint>>) -> Self {
        let mut resolver = PriceResolver::new();
        for (ticker, points) in histories {
            resolver.insert(ticker, PriceHistory::from_points(points));
        }
        resolver
    }

    pub fn insert(&mut self, ticker: String, history: PriceHistory) {
        self.histories.insert(ticker, history);
    }

    pub fn history(&self, ticker: &str) -> Option<&PriceHistory> {
        self.histories.get(ticker)
    }

    /// Best known price for `ticker` on `date`: the exact day's close when
    /// present, otherwise the last known close before it, otherwise `0.0`.
    pub fn price_as_of(&self, ticker: &str, date: NaiveDate) -> f64 {
        self.histories
            .get(ticker)
            .and_then(|h| h.as_of(date))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn resolver() -> PriceResolver {
        let mut histories = HashMap::new();
        histories.insert(
            "AAPL".to_string(),
            vec![
                PricePoint::new(date("2024-01-02"), 180.0),
                PricePoint::new(date("2024-01-05"), 185.0),
            ],
        );
        PriceResolver::from_histories(histories)
    }

    #[test]
    fn resolves_exact_and_forward_filled_prices() {
        let r = resolver();
        assert_eq!(r.price_as_of("AAPL", date("2024-01-02")), 180.0);
        assert_eq!(r.price_as_of("AAPL", date("2024-01-04")), 180.0);
        assert_eq!(r.price_as_of("AAPL", date("2024-01-05")), 185.0);
    }

    #[test]
    fn missing_data_resolves_to_zero() {
        let r = resolver();
        // Before any known price.
        assert_eq!(r.price_as_of("AAPL", date("2023-12-29")), 0.0);
        // Instrument with no history at all.
        assert_eq!(r.price_as_of("MISSING", date("2024-01-02")), 0.0);
    }

    #[test]
    fn repeated_queries_are_idempotent() {
        let r = resolver();
        let d = date("2024-01-03");
        assert_eq!(r.price_as_of("AAPL", d), r.price_as_of("AAPL", d));
    }
}
