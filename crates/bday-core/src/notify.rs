//! Notification planning and the dispatch contract.
//!
//! The planner is a pure mapping from the already-windowed, already-sorted
//! upcoming list to a bounded set of reminders. Delivery is an external
//! collaborator behind [`NotificationDispatcher`]; the planner itself
//! tracks no previously scheduled state.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::record::BirthdayRecord;

/// Cap on scheduled reminders unless the caller overrides it.
pub const DEFAULT_MAX_REMINDERS: usize = 10;

/// Local clock time reminders fire at unless configured otherwise.
///
/// A fixed time-of-day was chosen over "clock time when the plan ran" so
/// that re-planning at different times of day stays idempotent.
pub fn default_notify_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time")
}

/// One OS-level alert to schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledReminder {
    /// Stable identifier, `birthday_<record id>`.
    pub key: String,
    /// Local date and time of delivery.
    pub fires_at: NaiveDateTime,
    pub message: String,
}

/// Map the first `max_count` upcoming records to reminders.
///
/// `upcoming` must already be windowed and sorted nearest-first (the
/// classifier's `upcoming` bucket); each reminder fires on the record's
/// next occurrence at `notify_at` local time.
pub fn plan(
    upcoming: &[BirthdayRecord],
    today: NaiveDate,
    notify_at: NaiveTime,
    max_count: usize,
) -> Vec<ScheduledReminder> {
    upcoming
        .iter()
        .take(max_count)
        .map(|record| ScheduledReminder {
            key: format!("birthday_{}", record.id),
            fires_at: record.next_occurrence(today).and_time(notify_at),
            message: format!("It's {}'s birthday today! 🎉", record.name),
        })
        .collect()
}

/// Receiver of the planned reminder set.
///
/// Implementations replace wholesale: `cancel_all` runs before any
/// `schedule` call, so stale reminders for deleted or changed records
/// never persist across plans.
pub trait NotificationDispatcher {
    /// Drop every pending reminder previously scheduled through this
    /// dispatcher.
    fn cancel_all(&mut self);

    /// Schedule a single reminder.
    fn schedule(&mut self, reminder: &ScheduledReminder) -> Result<(), DispatchError>;
}

/// One reminder the dispatcher rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    pub key: String,
    pub error: DispatchError,
}

/// Cancel everything, then schedule the full set.
///
/// A rejected reminder is reported in the returned list and does not
/// abort scheduling of the remaining items. Calling this again with a
/// fresh plan fully replaces the previous one.
pub fn dispatch_replacing(
    dispatcher: &mut dyn NotificationDispatcher,
    reminders: &[ScheduledReminder],
) -> Vec<DispatchFailure> {
    dispatcher.cancel_all();
    let mut failures = Vec::new();
    for reminder in reminders {
        if let Err(error) = dispatcher.schedule(reminder) {
            failures.push(DispatchFailure {
                key: reminder.key.clone(),
                error,
            });
        }
    }
    failures
}
