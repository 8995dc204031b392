use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Timezone used to derive "today" for series extension and price refreshes.
/// The price vendors publish against the US trading calendar, so the series
/// day boundary follows New York rather than the local machine.
pub const MARKET_TZ: Tz = chrono_tz::America::New_York;

/// Current calendar day in the market timezone.
pub fn today_new_york() -> NaiveDate {
    Utc::now().with_timezone(&MARKET_TZ).date_naive()
}

/// Every calendar day from `start` through `end`, inclusive on both ends.
/// Empty when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}
