//! Recurring-date computation.
//!
//! Pure calendar arithmetic over validated month/day pairs. All functions
//! here are total: validation happens when a record is created (see
//! [`crate::record`]), so the engine never fails or panics over records
//! that reached it.

use chrono::{Datelike, Local, NaiveDate};

/// Today's date in the local calendar.
///
/// The injectable reference date for all computations; production callers
/// pass this, tests pass a fixed date.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The first calendar date matching `month`/`day` on or after `today`.
///
/// An occurrence falling on `today` itself counts as not yet passed, so
/// it never rolls over to next year.
///
/// Feb 29 in a non-leap target year resolves to Mar 1, never Feb 28, so
/// the resolved date cannot precede the requested month/day.
pub fn next_occurrence(month: u32, day: u32, today: NaiveDate) -> NaiveDate {
    let this_year = occurrence_in_year(today.year(), month, day);
    if this_year < today {
        occurrence_in_year(today.year() + 1, month, day)
    } else {
        this_year
    }
}

/// Whole days from `today` until the next occurrence of `month`/`day`.
///
/// Zero when the occurrence is today; never negative; always below 366.
pub fn days_until(month: u32, day: u32, today: NaiveDate) -> i64 {
    (next_occurrence(month, day, today) - today).num_days()
}

/// The occurrence of `month`/`day` within `year`, applying the Feb 29
/// rollover policy.
fn occurrence_in_year(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        // Only Feb 29 can miss once month/day passed validation.
        None => NaiveDate::from_ymd_opt(year, 3, 1).expect("Mar 1 exists in every year"),
    }
}
