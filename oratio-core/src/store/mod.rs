//! Storage contract for prayer records
//!
//! Two implementations exist: the whole-file JSON store in this module and
//! the Postgres-backed store in `oratio-server`. Callers cannot tell them
//! apart: both enforce date uniqueness, increment counters without losing
//! concurrent updates, and report the same error taxonomy.

use async_trait::async_trait;

use crate::record::{PrayerDate, PrayerRecord};

pub mod file;

pub use file::FileStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record with this date already exists
    #[error("a prayer for {date} already exists")]
    Duplicate { date: PrayerDate },

    /// No record with this date
    #[error("no prayer for {date}")]
    NotFound { date: PrayerDate },

    /// The backing connection is not established yet
    #[error("store connection not ready")]
    Unavailable,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage-engine fault; the detail is logged at the HTTP boundary
    #[error("backend error: {0}")]
    Backend(String),
}

/// Persistence contract shared by the file-backed and database-backed stores.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records, in insertion order. Empty when none exist.
    async fn list_all(&self) -> Result<Vec<PrayerRecord>, StoreError>;

    /// Exact-match lookup on the unique date key.
    async fn find_by_date(&self, date: PrayerDate) -> Result<PrayerRecord, StoreError>;

    /// Persist a new record. Fails with `Duplicate` when the date is taken.
    async fn insert(&self, record: PrayerRecord) -> Result<PrayerRecord, StoreError>;

    /// Add one to the record's counter and return the new value.
    ///
    /// Concurrent increments on the same date must all be reflected.
    async fn increment_count(&self, date: PrayerDate) -> Result<i64, StoreError>;

    /// Remove the record and return it.
    async fn delete(&self, date: PrayerDate) -> Result<PrayerRecord, StoreError>;
}
