//! SQLite-backed birthday store.
//!
//! Owner-scoped CRUD over a single `birthdays` table, plus snapshot
//! publication: every successful mutation pushes a fresh owner snapshot
//! to that owner's subscribers through a watch channel.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tokio::sync::watch;

use super::{data_dir, BirthdayStore};
use crate::error::StoreError;
use crate::record::BirthdayRecord;

/// SQLite database holding birthday records.
pub struct BirthdayDb {
    conn: Connection,
    publishers: RefCell<HashMap<String, watch::Sender<Vec<BirthdayRecord>>>>,
}

impl BirthdayDb {
    /// Open the database at `~/.config/bday/bday.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("bday.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        let db = Self {
            conn,
            publishers: RefCell::new(HashMap::new()),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn,
            publishers: RefCell::new(HashMap::new()),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS birthdays (
                    id         TEXT PRIMARY KEY,
                    owner_id   TEXT NOT NULL,
                    name       TEXT NOT NULL,
                    month      INTEGER NOT NULL,
                    day        INTEGER NOT NULL,
                    notes      TEXT,
                    created_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_birthdays_owner_id ON birthdays(owner_id);",
            )
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))
    }

    /// Look up a single record by id, scoped to its owner.
    pub fn get(&self, owner_id: &str, id: &str) -> Result<Option<BirthdayRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, month, day, notes, created_at
             FROM birthdays WHERE owner_id = ?1 AND id = ?2",
        )?;
        let result = stmt.query_row(params![owner_id, id], row_to_record);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Re-read `owner_id`'s records and publish them if they differ from
    /// the last delivered snapshot.
    ///
    /// Mutations through this handle publish on their own; `refresh` lets
    /// a caller drive the stream when another process may have written
    /// the store. An unchanged snapshot does not wake subscribers.
    pub fn refresh(&self, owner_id: &str) -> Result<(), StoreError> {
        self.publish(owner_id)
    }

    /// Push the current snapshot for `owner_id` to its subscribers.
    fn publish(&self, owner_id: &str) -> Result<(), StoreError> {
        let mut publishers = self.publishers.borrow_mut();
        let Some(tx) = publishers.get(owner_id) else {
            return Ok(());
        };
        if tx.is_closed() {
            publishers.remove(owner_id);
            return Ok(());
        }
        let snapshot = self.fetch_all(owner_id)?;
        tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot.clone();
                true
            }
        });
        Ok(())
    }
}

impl BirthdayStore for BirthdayDb {
    fn fetch_all(&self, owner_id: &str) -> Result<Vec<BirthdayRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, month, day, notes, created_at
             FROM birthdays WHERE owner_id = ?1
             ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map(params![owner_id], row_to_record)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn create(&self, record: &BirthdayRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO birthdays (id, owner_id, name, month, day, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                record.owner_id,
                record.name,
                record.month,
                record.day,
                record.notes,
                record.created_at.to_rfc3339(),
            ],
        )?;
        self.publish(&record.owner_id)
    }

    fn update(&self, record: &BirthdayRecord) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE birthdays SET name = ?1, month = ?2, day = ?3, notes = ?4
             WHERE id = ?5 AND owner_id = ?6",
            params![
                record.name,
                record.month,
                record.day,
                record.notes,
                record.id,
                record.owner_id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(record.id.clone()));
        }
        self.publish(&record.owner_id)
    }

    fn delete(&self, owner_id: &str, id: &str) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "DELETE FROM birthdays WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.publish(owner_id)
    }

    fn subscribe(
        &self,
        owner_id: &str,
    ) -> Result<watch::Receiver<Vec<BirthdayRecord>>, StoreError> {
        let mut publishers = self.publishers.borrow_mut();
        if let Some(tx) = publishers.get(owner_id) {
            if !tx.is_closed() {
                return Ok(tx.subscribe());
            }
            publishers.remove(owner_id);
        }
        let snapshot = self.fetch_all(owner_id)?;
        let (tx, rx) = watch::channel(snapshot);
        publishers.insert(owner_id.to_string(), tx);
        Ok(rx)
    }
}

fn row_to_record(row: &rusqlite::Row) -> Result<BirthdayRecord, rusqlite::Error> {
    let created_at_str: String = row.get(6)?;
    Ok(BirthdayRecord {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        month: row.get(3)?,
        day: row.get(4)?,
        notes: row.get(5)?,
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// Parse a datetime from an RFC3339 string with fallback to current time.
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
