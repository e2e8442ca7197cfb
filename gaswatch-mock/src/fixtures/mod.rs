pub mod history;
pub mod metrics;

use chrono::{Days, NaiveDate};

/// First fixture day.
pub const START: NaiveDate = match NaiveDate::from_ymd_opt(2021, 7, 15) {
    Some(d) => d,
    None => panic!("invalid fixture start"),
};

/// Number of consecutive fixture days (2021-07-15 ..= 2021-08-25).
pub const DAYS: u32 = 42;

pub fn day(i: u32) -> NaiveDate {
    START + Days::new(u64::from(i))
}

pub fn unix(i: u32) -> i64 {
    day(i).and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp())
}
