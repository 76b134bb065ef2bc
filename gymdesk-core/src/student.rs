//! Student records
//!
//! `Student` is a row exactly as stored. `StudentDraft` is validated input
//! for create/update; it is the only way new values reach the store.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Storage format for birth dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Separator between id and name in selector labels
const LABEL_SEPARATOR: &str = " - ";

/// Store-assigned surrogate key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(i64);

impl StudentId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Parse the id back out of a `"{id} - {name}"` selector label.
    ///
    /// ```
    /// use gymdesk_core::StudentId;
    ///
    /// assert_eq!(StudentId::from_label("3 - Ana - Silva"), Some(StudentId::new(3)));
    /// assert_eq!(StudentId::from_label("Ana"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        let (id, _) = label.split_once(LABEL_SEPARATOR)?;
        id.trim().parse().ok()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i64> for StudentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A student row as stored.
///
/// `birth_date` is kept as text because the store does not enforce its
/// format; use [`Student::birth_date_or_default`] when a date is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub birth_date: String,
    pub national_id: String,
}

impl Student {
    /// Selector label: `"{id} - {name}"`
    pub fn label(&self) -> String {
        format!("{}{}{}", self.id, LABEL_SEPARATOR, self.name)
    }

    /// Stored birth date, or 2000-01-01 when it cannot be parsed
    pub fn birth_date_or_default(&self) -> NaiveDate {
        parse_stored_date(&self.birth_date).unwrap_or_else(default_birth_date)
    }
}

/// Fallback shown in the edit form when a stored date is unreadable
pub fn default_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).expect("2000-01-01 is a valid date")
}

/// Parse a stored birth date.
///
/// Accepts the storage format plus the datetime and slash variants that
/// older rows or hand edits may contain.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return Some(date);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Validated input for creating or updating a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub birth_date: NaiveDate,
    pub national_id: String,
}

impl StudentDraft {
    /// Build a draft, checking that the text fields are present.
    ///
    /// Values are kept as given; blank (whitespace-only) counts as missing.
    pub fn new(
        name: impl Into<String>,
        birth_date: NaiveDate,
        national_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let national_id = national_id.into();

        if name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if national_id.trim().is_empty() {
            return Err(ValidationError::Empty { field: "national id" });
        }

        Ok(Self {
            name,
            birth_date,
            national_id,
        })
    }

    /// Build a draft from raw form text (date as `YYYY-MM-DD`).
    pub fn parse(name: &str, birth_date: &str, national_id: &str) -> Result<Self, ValidationError> {
        let birth_date = birth_date.trim();
        if birth_date.is_empty() {
            return Err(ValidationError::Empty {
                field: "birth date",
            });
        }
        let date = NaiveDate::parse_from_str(birth_date, DATE_FORMAT).map_err(|_| {
            ValidationError::InvalidFormat {
                field: "birth date",
                reason: "expected a date in YYYY-MM-DD format",
            }
        })?;

        Self::new(name, date, national_id)
    }

    /// Birth date in storage format
    pub fn birth_date_string(&self) -> String {
        self.birth_date.format(DATE_FORMAT).to_string()
    }

    /// The record this draft becomes once stored under `id`
    pub fn into_student(self, id: StudentId) -> Student {
        let birth_date = self.birth_date_string();
        Student {
            id,
            name: self.name,
            birth_date,
            national_id: self.national_id,
        }
    }
}
