//! Record storage: the repository contract plus the SQLite implementation.

mod sqlite;

pub use sqlite::BirthdayDb;

use std::path::PathBuf;

use tokio::sync::watch;

use crate::error::StoreError;
use crate::record::BirthdayRecord;

/// Data-access capability the core requires from a record store.
///
/// The core never assumes strong consistency: a mutation may not be
/// visible in the very next snapshot, and classification is recomputed
/// purely from whatever snapshot it is given, so transient staleness is
/// harmless.
pub trait BirthdayStore {
    /// All records belonging to `owner_id`.
    fn fetch_all(&self, owner_id: &str) -> Result<Vec<BirthdayRecord>, StoreError>;

    /// Persist a new record.
    fn create(&self, record: &BirthdayRecord) -> Result<(), StoreError>;

    /// Replace an existing record by id.
    fn update(&self, record: &BirthdayRecord) -> Result<(), StoreError>;

    /// Remove one of `owner_id`'s records by id.
    fn delete(&self, owner_id: &str, id: &str) -> Result<(), StoreError>;

    /// Live snapshot stream for one owner.
    ///
    /// The receiver starts at the current snapshot and wakes on every
    /// subsequent change; only the most recent snapshot is retained
    /// (last write wins). Dropping the receiver unsubscribes -- no
    /// further delivery, no background work.
    fn subscribe(&self, owner_id: &str)
        -> Result<watch::Receiver<Vec<BirthdayRecord>>, StoreError>;
}

/// Returns `~/.config/bday[-dev]/` based on BDAY_ENV.
///
/// Set BDAY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("BDAY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("bday-dev")
    } else {
        base_dir.join("bday")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
