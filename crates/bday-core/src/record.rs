//! The birthday record value object and its validation.
//!
//! A record stores a month/day with no year; age is intentionally not
//! derivable. Validation runs when a record is created or updated so the
//! date engine only ever sees valid month/day pairs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine;
use crate::error::ValidationError;

/// Leap year used as the reference for month/day validation, so Feb 29
/// is accepted as a valid recurring date.
const LEAP_REFERENCE_YEAR: i32 = 2000;

/// A single recurring birthday, scoped to one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayRecord {
    pub id: String,
    pub name: String,
    /// 1-12
    pub month: u32,
    /// 1-31, valid for `month` (Feb 29 permitted)
    pub day: u32,
    pub owner_id: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BirthdayRecord {
    /// Create a validated record with a fresh id and creation timestamp.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the name trims to empty, the owner
    /// id is empty, or month/day do not form a valid calendar date.
    pub fn new(
        name: &str,
        month: u32,
        day: u32,
        owner_id: &str,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        validate_month_day(month, day)?;
        let owner_id = owner_id.trim();
        if owner_id.is_empty() {
            return Err(ValidationError::EmptyOwner);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            month,
            day,
            owner_id: owner_id.to_string(),
            notes,
            created_at: Utc::now(),
        })
    }

    /// Replace the mutable fields. Id, owner and creation time stay fixed.
    ///
    /// # Errors
    /// Same validation as [`BirthdayRecord::new`]; on error the record is
    /// left unchanged.
    pub fn apply_update(
        &mut self,
        name: &str,
        month: u32,
        day: u32,
        notes: Option<String>,
    ) -> Result<(), ValidationError> {
        let name = validate_name(name)?;
        validate_month_day(month, day)?;
        self.name = name;
        self.month = month;
        self.day = day;
        self.notes = notes;
        Ok(())
    }

    /// Next occurrence of this birthday on or after `today`.
    pub fn next_occurrence(&self, today: NaiveDate) -> NaiveDate {
        engine::next_occurrence(self.month, self.day, today)
    }

    /// Whole days until the next occurrence; zero when it is today.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        engine::days_until(self.month, self.day, today)
    }

    /// Short "Dec 25" style label for the next occurrence.
    pub fn occurrence_label(&self, today: NaiveDate) -> String {
        self.next_occurrence(today).format("%b %-d").to_string()
    }
}

/// Check that `month`/`day` form a valid recurring calendar date.
pub fn validate_month_day(month: u32, day: u32) -> Result<(), ValidationError> {
    if NaiveDate::from_ymd_opt(LEAP_REFERENCE_YEAR, month, day).is_none() {
        return Err(ValidationError::InvalidDate { month, day });
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_trims_name() {
        let r = BirthdayRecord::new("  Ada  ", 12, 10, "owner-1", None).unwrap();
        assert_eq!(r.name, "Ada");
        assert!(!r.id.is_empty());
    }

    #[test]
    fn feb_29_is_a_valid_recurring_date() {
        assert!(validate_month_day(2, 29).is_ok());
    }

    #[test]
    fn rejects_invalid_dates() {
        assert_eq!(
            validate_month_day(2, 30),
            Err(ValidationError::InvalidDate { month: 2, day: 30 })
        );
        assert_eq!(
            validate_month_day(13, 1),
            Err(ValidationError::InvalidDate { month: 13, day: 1 })
        );
        assert_eq!(
            validate_month_day(4, 31),
            Err(ValidationError::InvalidDate { month: 4, day: 31 })
        );
        assert_eq!(
            validate_month_day(0, 1),
            Err(ValidationError::InvalidDate { month: 0, day: 1 })
        );
    }

    #[test]
    fn rejects_blank_name_and_owner() {
        assert_eq!(
            BirthdayRecord::new("   ", 1, 1, "owner-1", None).unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            BirthdayRecord::new("Ada", 1, 1, "  ", None).unwrap_err(),
            ValidationError::EmptyOwner
        );
    }

    #[test]
    fn update_keeps_identity_and_validates() {
        let mut r = BirthdayRecord::new("Ada", 12, 10, "owner-1", None).unwrap();
        let id = r.id.clone();
        let created = r.created_at;

        r.apply_update("Grace", 12, 9, Some("colleague".into())).unwrap();
        assert_eq!(r.name, "Grace");
        assert_eq!(r.day, 9);
        assert_eq!(r.id, id);
        assert_eq!(r.created_at, created);

        assert!(r.apply_update("Grace", 2, 30, None).is_err());
        // failed update leaves the record untouched
        assert_eq!(r.day, 9);
    }

    #[test]
    fn occurrence_label_formats_month_day() {
        let r = BirthdayRecord::new("Ada", 12, 25, "owner-1", None).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(r.occurrence_label(today), "Dec 25");
    }
}
