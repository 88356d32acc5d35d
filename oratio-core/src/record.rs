//! Prayer record domain types
//!
//! All user input is validated when constructing these types. Invalid
//! input returns ValidationError, not panic.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Wire format for record dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is absent or empty when it shouldn't be
    Empty { field: &'static str },

    /// String doesn't match the required format
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Numeric field outside its allowed range
    OutOfRange { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::OutOfRange { field } => write!(f, "{} must be zero or greater", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Day key for prayer records, wire format `YYYY-MM-DD`.
///
/// Uniqueness of records hangs off this value, so it is parsed into a real
/// calendar date instead of being compared as an opaque string: `2026-02-30`
/// is rejected, and both stores address the same canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrayerDate(NaiveDate);

impl PrayerDate {
    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "date" });
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "date",
                reason: "expected YYYY-MM-DD",
            })
    }

    /// The current date in UTC, the key `/api/prayers/today` resolves to.
    pub fn today_utc() -> Self {
        Self(Utc::now().date_naive())
    }

    /// The underlying calendar date.
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for PrayerDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for PrayerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for PrayerDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One prayer-subject entry keyed by its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerRecord {
    pub date: PrayerDate,
    pub title: String,
    pub subject: String,
    /// Times this subject has been prayed for. Only ever moves by +1.
    #[serde(default)]
    pub count: i64,
}

impl PrayerRecord {
    /// Build a validated record. Title and subject are trimmed and must be
    /// non-empty; `count` defaults to 0 when absent.
    pub fn new(
        date: &str,
        title: &str,
        subject: &str,
        count: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let date = PrayerDate::parse(date)?;
        let title = required("title", title)?;
        let subject = required("subject", subject)?;
        let count = count.unwrap_or(0);
        if count < 0 {
            return Err(ValidationError::OutOfRange { field: "count" });
        }
        Ok(Self {
            date,
            title,
            subject,
            count,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}
