//! Whole-file JSON store
//!
//! The entire collection lives in a single document, `{"prayers": [...]}`.
//! Every mutation reads the document, changes it in memory, and rewrites the
//! file; a mutex serializes those cycles so two concurrent writers cannot
//! overwrite each other's changes. Reads take no lock and never write: a
//! snapshot may be one write behind, and a torn or damaged file is served as
//! an empty collection.
//!
//! A corrupt or unreadable data file is reset to an empty collection by
//! `open` and by the lock-holding mutations; it never takes the process
//! down.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{RecordStore, StoreError};
use crate::record::{PrayerDate, PrayerRecord};

/// Persisted document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    prayers: Vec<PrayerRecord>,
}

/// File-backed record store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Guards the read-modify-write cycle of every mutation, and with it
    /// every rewrite of the file after `open`.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`, creating the file (and parent directories)
    /// with an empty collection when missing, and resetting a damaged file
    /// before the store is shared.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let store = Self {
            path,
            write_lock: Mutex::new(()),
        };
        if !fs::try_exists(&store.path).await? {
            write_document(&store.path, &Document::default()).await?;
            debug!(path = %store.path.display(), "created empty data file");
        } else {
            store.load_or_reset().await?;
        }
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot for the lock-free read path. A file that cannot be read or
    /// parsed (including a torn view of an in-flight rewrite) is served as
    /// an empty collection; nothing is written.
    async fn read_snapshot(&self) -> Document {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "data file unreadable, serving empty snapshot"
                );
                return Document::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "data file unparseable, serving empty snapshot"
                );
                Document::default()
            }
        }
    }

    /// Read the whole document, resetting a corrupt or unreadable file to an
    /// empty collection. Only called from `open` and from mutations holding
    /// `write_lock`, so the rewrite cannot race another writer.
    async fn load_or_reset(&self) -> Result<Document, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "data file unreadable, resetting to empty collection"
                );
                return self.reset_empty().await;
            }
        };
        match serde_json::from_str::<Document>(&raw) {
            Ok(doc) => Ok(doc),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "data file corrupt, resetting to empty collection"
                );
                self.reset_empty().await
            }
        }
    }

    async fn reset_empty(&self) -> Result<Document, StoreError> {
        let doc = Document::default();
        write_document(&self.path, &doc).await?;
        Ok(doc)
    }
}

async fn write_document(path: &Path, doc: &Document) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(doc)?;
    fs::write(path, raw).await?;
    Ok(())
}

#[async_trait]
impl RecordStore for FileStore {
    async fn list_all(&self) -> Result<Vec<PrayerRecord>, StoreError> {
        Ok(self.read_snapshot().await.prayers)
    }

    async fn find_by_date(&self, date: PrayerDate) -> Result<PrayerRecord, StoreError> {
        self.read_snapshot()
            .await
            .prayers
            .into_iter()
            .find(|p| p.date == date)
            .ok_or(StoreError::NotFound { date })
    }

    async fn insert(&self, record: PrayerRecord) -> Result<PrayerRecord, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load_or_reset().await?;
        if doc.prayers.iter().any(|p| p.date == record.date) {
            return Err(StoreError::Duplicate { date: record.date });
        }
        doc.prayers.push(record.clone());
        write_document(&self.path, &doc).await?;
        debug!(date = %record.date, title = %record.title, "prayer saved");
        Ok(record)
    }

    async fn increment_count(&self, date: PrayerDate) -> Result<i64, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load_or_reset().await?;
        let record = doc
            .prayers
            .iter_mut()
            .find(|p| p.date == date)
            .ok_or(StoreError::NotFound { date })?;
        record.count = record
            .count
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("prayer count overflow".into()))?;
        let count = record.count;
        write_document(&self.path, &doc).await?;
        debug!(%date, count, "prayer count incremented");
        Ok(count)
    }

    async fn delete(&self, date: PrayerDate) -> Result<PrayerRecord, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load_or_reset().await?;
        let index = doc
            .prayers
            .iter()
            .position(|p| p.date == date)
            .ok_or(StoreError::NotFound { date })?;
        let removed = doc.prayers.remove(index);
        write_document(&self.path, &doc).await?;
        debug!(%date, title = %removed.title, "prayer deleted");
        Ok(removed)
    }
}
