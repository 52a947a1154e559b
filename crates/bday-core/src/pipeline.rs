//! Snapshot-to-view pipeline.
//!
//! One pure function turns a record snapshot into everything a view or
//! dispatcher needs; [`ViewSubscription`] re-runs it on each snapshot the
//! store delivers. There is no hidden fan-out between views: callers hold
//! a subscription for exactly as long as the view exists and drop it to
//! stop delivery.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::classify::{classify, Classification};
use crate::notify::{plan, ScheduledReminder};
use crate::record::BirthdayRecord;

/// Parameters the pipeline derives with, typically sourced from
/// [`crate::config::Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewParams {
    pub window_days: i64,
    pub notify_at: NaiveTime,
    pub max_reminders: usize,
}

/// Everything derived from one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingView {
    pub classification: Classification,
    pub reminders: Vec<ScheduledReminder>,
}

/// Derive the full view from a snapshot.
///
/// Pure and cheap: safe to invoke synchronously from the subscription
/// callback on every delivery.
pub fn derive_view(
    snapshot: &[BirthdayRecord],
    today: NaiveDate,
    params: &ViewParams,
) -> UpcomingView {
    let classification = classify(snapshot, today, params.window_days);
    let reminders = plan(
        &classification.upcoming,
        today,
        params.notify_at,
        params.max_reminders,
    );
    UpcomingView {
        classification,
        reminders,
    }
}

/// A scoped live view over one owner's records.
///
/// Holds the store subscription for its own lifetime; dropping the
/// subscription releases it and no further snapshots are delivered.
pub struct ViewSubscription {
    rx: watch::Receiver<Vec<BirthdayRecord>>,
    params: ViewParams,
}

impl ViewSubscription {
    pub fn new(rx: watch::Receiver<Vec<BirthdayRecord>>, params: ViewParams) -> Self {
        Self { rx, params }
    }

    /// Derive the view from the most recently delivered snapshot.
    pub fn current(&self, today: NaiveDate) -> UpcomingView {
        let snapshot = self.rx.borrow().clone();
        derive_view(&snapshot, today, &self.params)
    }

    /// Wait for the next snapshot and derive the view from it.
    ///
    /// Returns `None` once the store side is gone and no further
    /// snapshots will arrive.
    pub async fn next_view(&mut self, today: NaiveDate) -> Option<UpcomingView> {
        self.rx.changed().await.ok()?;
        let snapshot = self.rx.borrow_and_update().clone();
        Some(derive_view(&snapshot, today, &self.params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::default_notify_time;
    use crate::store::{BirthdayDb, BirthdayStore};

    fn params(window_days: i64) -> ViewParams {
        ViewParams {
            window_days,
            notify_at: default_notify_time(),
            max_reminders: 10,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn derive_view_combines_classification_and_plan() {
        let today = date(2024, 6, 1);
        let snapshot = vec![
            BirthdayRecord::new("Near", 6, 5, "alice", None).unwrap(),
            BirthdayRecord::new("Far", 12, 25, "alice", None).unwrap(),
        ];

        let view = derive_view(&snapshot, today, &params(30));
        assert_eq!(view.classification.upcoming.len(), 1);
        assert_eq!(view.classification.all.len(), 2);
        assert_eq!(view.reminders.len(), 1);
        assert!(view.reminders[0].message.contains("Near"));
    }

    #[test]
    fn subscription_recomputes_on_each_snapshot() {
        let db = BirthdayDb::open_memory().unwrap();
        let today = date(2024, 6, 1);
        let sub = ViewSubscription::new(db.subscribe("alice").unwrap(), params(30));

        assert!(sub.current(today).classification.all.is_empty());

        let r = BirthdayRecord::new("Ada", 6, 5, "alice", None).unwrap();
        db.create(&r).unwrap();
        let view = sub.current(today);
        assert_eq!(view.classification.upcoming.len(), 1);
        assert_eq!(view.reminders[0].key, format!("birthday_{}", r.id));

        db.delete("alice", &r.id).unwrap();
        assert!(sub.current(today).classification.all.is_empty());
    }

    #[tokio::test]
    async fn next_view_wakes_on_change_and_ends_with_store() {
        let db = BirthdayDb::open_memory().unwrap();
        let today = date(2024, 6, 1);
        let mut sub = ViewSubscription::new(db.subscribe("alice").unwrap(), params(30));

        db.create(&BirthdayRecord::new("Ada", 6, 5, "alice", None).unwrap())
            .unwrap();
        let view = sub.next_view(today).await.unwrap();
        assert_eq!(view.classification.upcoming.len(), 1);

        drop(db);
        assert!(sub.next_view(today).await.is_none());
    }
}
