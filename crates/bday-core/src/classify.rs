//! Bucketing of a record snapshot into today / upcoming / all views.
//!
//! Pure and deterministic: the same snapshot, reference date and window
//! always produce identical bucket contents and order, so the caller can
//! re-run classification on every snapshot without coordination.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::BirthdayRecord;

/// The three derived views over one owner's records.
///
/// A record with its birthday today appears in both `today` and
/// `upcoming` (for any non-negative window); no bucket ever contains
/// duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    /// Birthdays occurring today, by creation time then id.
    pub today: Vec<BirthdayRecord>,
    /// Birthdays within the window, nearest first.
    pub upcoming: Vec<BirthdayRecord>,
    /// Every record, nearest first.
    pub all: Vec<BirthdayRecord>,
}

/// Partition and sort `records` against `today` and `window_days`.
///
/// `upcoming` and `all` are ordered by days-until ascending, ties broken
/// by creation time then id; `today` is ordered by creation time then id.
/// The window is caller-supplied: the home view uses 30 days, the
/// dashboard 90 (see [`crate::config::Config`]).
pub fn classify(records: &[BirthdayRecord], today: NaiveDate, window_days: i64) -> Classification {
    let mut by_proximity: Vec<(i64, &BirthdayRecord)> =
        records.iter().map(|r| (r.days_until(today), r)).collect();
    by_proximity.sort_by(|a, b| proximity_order(a, b));

    let upcoming: Vec<BirthdayRecord> = by_proximity
        .iter()
        .filter(|(days, _)| *days <= window_days)
        .map(|(_, r)| (*r).clone())
        .collect();

    let mut todays: Vec<BirthdayRecord> = by_proximity
        .iter()
        .filter(|(days, _)| *days == 0)
        .map(|(_, r)| (*r).clone())
        .collect();
    todays.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    let all = by_proximity.into_iter().map(|(_, r)| r.clone()).collect();

    Classification {
        today: todays,
        upcoming,
        all,
    }
}

fn proximity_order(a: &(i64, &BirthdayRecord), b: &(i64, &BirthdayRecord)) -> Ordering {
    a.0.cmp(&b.0)
        .then_with(|| a.1.created_at.cmp(&b.1.created_at))
        .then_with(|| a.1.id.cmp(&b.1.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, month: u32, day: u32, created_secs: i64) -> BirthdayRecord {
        let mut r = BirthdayRecord::new(id, month, day, "owner-1", None).unwrap();
        r.id = id.to_string();
        r.created_at = Utc.timestamp_opt(created_secs, 0).unwrap();
        r
    }

    #[test]
    fn buckets_today_upcoming_and_all() {
        let today = date(2024, 6, 1);
        let records = vec![
            record("far", 12, 25, 0),
            record("near", 6, 10, 0),
            record("now", 6, 1, 0),
        ];

        let c = classify(&records, today, 30);
        assert_eq!(ids(&c.today), vec!["now"]);
        assert_eq!(ids(&c.upcoming), vec!["now", "near"]);
        assert_eq!(ids(&c.all), vec!["now", "near", "far"]);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let today = date(2024, 6, 1);
        let records = vec![
            record("at-window", 7, 1, 0),  // 30 days out
            record("past-window", 7, 2, 0), // 31 days out
        ];

        let c = classify(&records, today, 30);
        assert_eq!(ids(&c.upcoming), vec!["at-window"]);
        assert_eq!(ids(&c.all), vec!["at-window", "past-window"]);
    }

    #[test]
    fn ties_break_by_created_at_then_id() {
        let today = date(2024, 6, 1);
        let records = vec![
            record("b", 6, 10, 100),
            record("a", 6, 10, 100),
            record("c", 6, 10, 50),
        ];

        let c = classify(&records, today, 30);
        assert_eq!(ids(&c.upcoming), vec!["c", "a", "b"]);
    }

    #[test]
    fn today_is_subset_of_upcoming() {
        let today = date(2024, 6, 1);
        let records = vec![record("now-1", 6, 1, 10), record("now-2", 6, 1, 5)];

        let c = classify(&records, today, 0);
        assert_eq!(ids(&c.today), vec!["now-2", "now-1"]);
        for r in &c.today {
            assert!(c.upcoming.iter().any(|u| u.id == r.id));
        }
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let today = date(2024, 11, 20);
        let records = vec![
            record("a", 1, 1, 3),
            record("b", 11, 25, 2),
            record("c", 2, 29, 1),
        ];

        let c1 = classify(&records, today, 90);
        let c2 = classify(&records, today, 90);
        assert_eq!(ids(&c1.all), ids(&c2.all));
        assert_eq!(ids(&c1.upcoming), ids(&c2.upcoming));
        assert_eq!(ids(&c1.today), ids(&c2.today));
    }

    #[test]
    fn upcoming_ordering_is_non_decreasing() {
        let today = date(2024, 11, 20);
        let records = vec![
            record("a", 12, 25, 0),
            record("b", 11, 21, 0),
            record("c", 1, 15, 0),
            record("d", 11, 20, 0),
        ];

        let c = classify(&records, today, 90);
        let days: Vec<i64> = c.upcoming.iter().map(|r| r.days_until(today)).collect();
        assert!(days.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn empty_snapshot_classifies_to_empty_buckets() {
        let c = classify(&[], date(2024, 6, 1), 30);
        assert!(c.today.is_empty());
        assert!(c.upcoming.is_empty());
        assert!(c.all.is_empty());
    }

    fn ids(records: &[BirthdayRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }
}
