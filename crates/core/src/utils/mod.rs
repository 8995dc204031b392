pub mod money_utils;
pub mod time_utils;

pub use money_utils::round_cents;
pub use time_utils::{days_between, today_new_york};
