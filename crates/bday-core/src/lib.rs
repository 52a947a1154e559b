//! # Bday Core Library
//!
//! This library provides the core logic for Bday, a personal birthday
//! reminder. Birthdays are month/day records with no year; everything the
//! application shows or schedules is derived from them and a reference date.
//!
//! ## Architecture
//!
//! - **Date Engine**: pure functions computing the next occurrence of a
//!   month/day and the whole-day distance to it
//! - **Classifier**: pure bucketing of a record snapshot into today /
//!   upcoming-window / all views
//! - **Notification Planner**: maps the upcoming view to a bounded,
//!   replace-wholesale set of scheduled reminders
//! - **Store**: the repository contract the core depends on, plus a
//!   SQLite implementation with a live snapshot stream
//! - **Pipeline**: the explicit snapshot-to-view derivation invoked on
//!   every new snapshot
//!
//! ## Key Components
//!
//! - [`BirthdayRecord`]: validated month/day record
//! - [`classify`]: snapshot bucketing
//! - [`BirthdayStore`]: data-access capability with subscriptions
//! - [`ViewSubscription`]: scoped live view over one owner's records

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod notify;
pub mod pipeline;
pub mod record;
pub mod store;

pub use classify::{classify, Classification};
pub use config::Config;
pub use error::{CoreError, ConfigError, DispatchError, StoreError, ValidationError};
pub use notify::{
    dispatch_replacing, plan, DispatchFailure, NotificationDispatcher, ScheduledReminder,
};
pub use pipeline::{derive_view, UpcomingView, ViewParams, ViewSubscription};
pub use record::BirthdayRecord;
pub use store::{BirthdayDb, BirthdayStore};
