//! Postgres-backed record store
//!
//! Uniqueness, the atomic counter increment, and delete-and-return are all
//! delegated to engine primitives (unique index, `count = count + 1 ..
//! RETURNING`, `DELETE .. RETURNING`); no in-process locking is involved.
//!
//! The pool cell stays empty until the connection supervisor has finished
//! connecting; until then every operation reports `Unavailable`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tokio::sync::OnceCell;

use oratio_core::{PrayerDate, PrayerRecord, RecordStore, StoreError};

/// Row shape of the prayers table.
#[derive(Debug, FromRow)]
struct PrayerRow {
    date: NaiveDate,
    title: String,
    subject: String,
    count: i64,
}

impl From<PrayerRow> for PrayerRecord {
    fn from(row: PrayerRow) -> Self {
        Self {
            date: PrayerDate::from(row.date),
            title: row.title,
            subject: row.subject,
            count: row.count,
        }
    }
}

/// Record store over a supervised Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: Arc<OnceCell<PgPool>>,
}

impl PgStore {
    /// Wrap the cell the connection supervisor fills in once connected.
    pub fn new(pool: Arc<OnceCell<PgPool>>) -> Self {
        Self { pool }
    }

    /// Wrap an already-connected pool (tests, one-shot tooling).
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(OnceCell::new_with(Some(pool))),
        }
    }

    fn pool(&self) -> Result<&PgPool, StoreError> {
        self.pool.get().ok_or(StoreError::Unavailable)
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn list_all(&self) -> Result<Vec<PrayerRecord>, StoreError> {
        let rows: Vec<PrayerRow> =
            sqlx::query_as("SELECT date, title, subject, count FROM prayers ORDER BY id")
                .fetch_all(self.pool()?)
                .await
                .map_err(backend)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_date(&self, date: PrayerDate) -> Result<PrayerRecord, StoreError> {
        let row: Option<PrayerRow> =
            sqlx::query_as("SELECT date, title, subject, count FROM prayers WHERE date = $1")
                .bind(date.as_naive_date())
                .fetch_optional(self.pool()?)
                .await
                .map_err(backend)?;
        row.map(Into::into).ok_or(StoreError::NotFound { date })
    }

    async fn insert(&self, record: PrayerRecord) -> Result<PrayerRecord, StoreError> {
        let row: PrayerRow = sqlx::query_as(
            r#"
            INSERT INTO prayers (date, title, subject, count)
            VALUES ($1, $2, $3, $4)
            RETURNING date, title, subject, count
            "#,
        )
        .bind(record.date.as_naive_date())
        .bind(&record.title)
        .bind(&record.subject)
        .bind(record.count)
        .fetch_one(self.pool()?)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::Duplicate { date: record.date }
            } else {
                backend(err)
            }
        })?;
        Ok(row.into())
    }

    async fn increment_count(&self, date: PrayerDate) -> Result<i64, StoreError> {
        let row: Option<(i64,)> =
            sqlx::query_as("UPDATE prayers SET count = count + 1 WHERE date = $1 RETURNING count")
                .bind(date.as_naive_date())
                .fetch_optional(self.pool()?)
                .await
                .map_err(backend)?;
        row.map(|(count,)| count)
            .ok_or(StoreError::NotFound { date })
    }

    async fn delete(&self, date: PrayerDate) -> Result<PrayerRecord, StoreError> {
        let row: Option<PrayerRow> = sqlx::query_as(
            "DELETE FROM prayers WHERE date = $1 RETURNING date, title, subject, count",
        )
        .bind(date.as_naive_date())
        .fetch_optional(self.pool()?)
        .await
        .map_err(backend)?;
        row.map(Into::into).ok_or(StoreError::NotFound { date })
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
