use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

/// A single closing price for an instrument on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        PricePoint { date, price }
    }
}

/// As-of lookup over a date-indexed series.
///
/// `as_of` answers "what was the value on this day", falling back to the
/// latest known value strictly before the queried date. `None` means no
/// value existed at or before the date.
pub trait PriceIndex {
    fn as_of(&self, date: NaiveDate) -> Option<f64>;
}

/// One instrument's price series, held sorted ascending with unique dates
/// so lookups stay logarithmic. The series is sparse: weekends, holidays,
/// and vendor gaps are simply absent and resolved by forward-fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Builds a history from raw points. Input may be unsorted and may
    /// contain duplicate dates (the last write wins). Points with a
    /// non-finite or non-positive price are dropped, not errors: a bad row
    /// must not poison the rest of the series.
    pub fn from_points(points: Vec<PricePoint>) -> Self {
        let mut cleaned: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| {
                let valid = p.price.is_finite() && p.price > 0.0;
                if !valid {
                    warn!("Dropping invalid price {} on {}", p.price, p.date);
                }
                valid
            })
            .collect();
        cleaned.sort_by_key(|p| p.date);
        // Last write wins on duplicate dates.
        cleaned.reverse();
        cleaned.dedup_by_key(|p| p.date);
        cleaned.reverse();
        PriceHistory { points: cleaned }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Date of the most recent known price.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }
}

impl PriceIndex for PriceHistory {
    fn as_of(&self, date: NaiveDate) -> Option<f64> {
        // Index of the first point strictly after `date`; everything before
        // it is at or before the queried day.
        let idx = self.points.partition_point(|p| p.date <= date);
        if idx == 0 {
            return None;
        }
        Some(self.points[idx - 1].price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn history(rows: &[(&str, f64)]) -> PriceHistory {
        PriceHistory::from_points(
            rows.iter()
                .map(|(d, p)| PricePoint::new(date(d), *p))
                .collect(),
        )
    }

    #[test]
    fn exact_date_match() {
        let h = history(&[("2024-01-02", 10.0), ("2024-01-05", 12.0)]);
        assert_eq!(h.as_of(date("2024-01-05")), Some(12.0));
    }

    #[test]
    fn forward_fills_from_latest_earlier_date() {
        let h = history(&[("2024-01-02", 10.0), ("2024-01-05", 12.0)]);
        assert_eq!(h.as_of(date("2024-01-04")), Some(10.0));
        assert_eq!(h.as_of(date("2024-12-31")), Some(12.0));
    }

    #[test]
    fn none_before_first_known_date() {
        let h = history(&[("2024-01-02", 10.0)]);
        assert_eq!(h.as_of(date("2024-01-01")), None);
    }

    #[test]
    fn unsorted_input_is_sorted_and_last_write_wins() {
        let h = history(&[
            ("2024-01-05", 12.0),
            ("2024-01-02", 10.0),
            ("2024-01-02", 11.0),
        ]);
        assert_eq!(h.len(), 2);
        assert_eq!(h.as_of(date("2024-01-02")), Some(11.0));
        assert_eq!(h.last_date(), Some(date("2024-01-05")));
    }

    #[test]
    fn invalid_prices_are_dropped() {
        let h = history(&[
            ("2024-01-02", 0.0),
            ("2024-01-03", -5.0),
            ("2024-01-04", f64::NAN),
            ("2024-01-05", 12.0),
        ]);
        assert_eq!(h.len(), 1);
        assert_eq!(h.as_of(date("2024-01-04")), None);
    }

    #[test]
    fn as_of_is_monotonic_across_a_gap() {
        // Forward-fill invariant: with no prices strictly between two query
        // dates, both resolve to the same value.
        let h = history(&[("2024-01-02", 10.0), ("2024-02-01", 20.0)]);
        let d1 = date("2024-01-10");
        let d2 = date("2024-01-31");
        assert_eq!(h.as_of(d1), h.as_of(d2));
    }
}
