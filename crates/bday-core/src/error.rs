//! Core error types for bday-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures are surfaced at the record-creation boundary so the date
//! engine can assume valid input and stay total.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bday-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Reminder dispatch errors
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Record validation errors.
///
/// These are raised when a record is created or updated, never inside
/// the pure date computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// month/day do not form a valid calendar date (Feb 29 is valid)
    #[error("Invalid calendar date: month {month}, day {day}")]
    InvalidDate { month: u32, day: u32 },

    /// Name is empty after trimming
    #[error("Name must not be empty")]
    EmptyName,

    /// Owner id is empty
    #[error("Owner id must not be empty")]
    EmptyOwner,
}

/// Store-specific errors.
///
/// Opaque to callers of the core: the core propagates these without
/// retrying; retry policy belongs to the store itself.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Store migration failed: {0}")]
    MigrationFailed(String),

    /// No record with the given id for the given owner
    #[error("Record not found: {0}")]
    NotFound(String),

    /// IO errors while locating or creating the data directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single reminder failed to schedule.
///
/// Collected per item; one failure never aborts the rest of the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The platform has not granted notification permission
    #[error("Notification permission not granted")]
    PermissionDenied,

    /// The dispatcher rejected this reminder
    #[error("Dispatcher rejected '{key}': {message}")]
    Rejected { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
