use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One adjusted daily close as returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    pub date: NaiveDate,
    pub close: f64,
}

impl DailyClose {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        DailyClose { date, close }
    }
}

/// Keeps only rows with a parseable date and a finite close, sorted
/// ascending. Providers run their raw vendor rows through this before
/// returning.
pub fn clean_rows(rows: Vec<(String, f64)>) -> Vec<DailyClose> {
    let mut cleaned: Vec<DailyClose> = rows
        .into_iter()
        .filter_map(|(date, close)| {
            if !close.is_finite() {
                return None;
            }
            let date = date.get(..10)?.parse().ok()?;
            Some(DailyClose::new(date, close))
        })
        .collect();
    cleaned.sort_by_key(|row| row.date);
    cleaned
}
