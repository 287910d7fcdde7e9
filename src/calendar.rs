use chrono::{Datelike, Month, NaiveDate, NaiveDateTime};

use crate::constants::generator::WINDOW_START;

/// Months in canonical calendar order.
pub const CALENDAR_MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Midnight of the first day of the generator window, or `None` if the
/// configured start is not a valid date.
pub fn window_start() -> Option<NaiveDateTime> {
    let (year, month, day) = WINDOW_START;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

/// Drop the time-of-day component of a generated timestamp.
pub fn normalize_timestamp(timestamp: NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

/// Calendar month of `date`.
pub fn month_of(date: NaiveDate) -> Month {
    CALENDAR_MONTHS[date.month0() as usize]
}

/// Calendar quarter (1-4) of `date`.
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}
