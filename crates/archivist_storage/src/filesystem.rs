//! Filesystem-backed usage store.
//!
//! One JSON document per user, addressed by the SHA-256 of the user id so
//! arbitrary ids map to safe file names.

use crate::{UsageStore, roll_over};
use archivist_core::{QueryUsage, UsageRecord};
use archivist_error::{ArchivistResult, StorageError, StorageErrorKind};
use chrono::NaiveDate;
use fs2::FileExt;
use sha2::{Digest, Sha256};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Durable usage store.
///
/// Layout: `{base_path}/{hash[0:2]}/{hash}.json`, where `hash` is the hex
/// SHA-256 of the user id. Each record has a sibling `{hash}.lock`.
///
/// ```text
/// /var/lib/archivist/usage/
/// ├── 3f/
/// │   ├── 3fa2c1...e9.json
/// │   └── 3fa2c1...e9.lock
/// └── b7/
///     ├── b7d04e...1c.json
///     └── b7d04e...1c.lock
/// ```
///
/// Every read-modify-write cycle holds an exclusive OS lock on the user's
/// lock file, so stores in separate threads or processes pointed at the
/// same directory never lose an update. Writes land in a uniquely named
/// temp file that is renamed over the record.
pub struct FileUsageStore {
    base_path: PathBuf,
}

impl FileUsageStore {
    /// Create a new filesystem usage store.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> ArchivistResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened filesystem usage store");
        Ok(Self { base_path })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File holding `user_id`'s record.
    pub fn record_path(&self, user_id: &str) -> PathBuf {
        self.user_file(user_id, "json")
    }

    /// Lock file guarding `user_id`'s record.
    pub fn lock_path(&self, user_id: &str) -> PathBuf {
        self.user_file(user_id, "lock")
    }

    fn user_file(&self, user_id: &str, extension: &str) -> PathBuf {
        let hash = Self::compute_hash(user_id);
        self.base_path
            .join(&hash[0..2])
            .join(format!("{}.{}", hash, extension))
    }

    fn compute_hash(user_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(user_id.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn ensure_parent(path: &Path) -> ArchivistResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }
        Ok(())
    }

    /// Blocks until this handle holds the user's lock. Released when the file drops.
    fn lock_user(&self, user_id: &str) -> ArchivistResult<File> {
        let path = self.lock_path(user_id);
        Self::ensure_parent(&path)?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Lock(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;

        FileExt::lock_exclusive(&file).map_err(|e| {
            StorageError::new(StorageErrorKind::Lock(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(file)
    }

    fn load(&self, user_id: &str, path: &Path) -> ArchivistResult<Option<UsageRecord>> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        let record: UsageRecord = serde_json::from_str(&json).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        if record.user_id() != user_id {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{} holds the record of another user",
                path.display()
            )))
            .into());
        }

        Ok(Some(record))
    }

    fn save(&self, path: &Path, record: &UsageRecord) -> ArchivistResult<()> {
        Self::ensure_parent(path)?;
        let parent = path.parent().unwrap_or(&self.base_path);

        let json = serde_json::to_string_pretty(record).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(e.to_string()))
        })?;

        let write_error = |e: std::io::Error| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        };

        let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(write_error)?;
        temp.write_all(json.as_bytes()).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;
        temp.persist(path).map_err(|e| write_error(e.error))?;

        Ok(())
    }

    /// Today's record, rolled over and persisted if needed. Caller holds the user lock.
    fn current(&self, user_id: &str, today: NaiveDate, path: &Path) -> ArchivistResult<UsageRecord> {
        match self.load(user_id, path)? {
            Some(mut record) => {
                if roll_over(&mut record, user_id, today) {
                    self.save(path, &record)?;
                }
                Ok(record)
            }
            None => {
                tracing::debug!(user_id, %today, "Creating usage record");
                let record = UsageRecord::new(user_id, today);
                self.save(path, &record)?;
                Ok(record)
            }
        }
    }
}

impl UsageStore for FileUsageStore {
    #[tracing::instrument(skip(self))]
    fn get_or_create(&self, user_id: &str, today: NaiveDate) -> ArchivistResult<UsageRecord> {
        let _lock = self.lock_user(user_id)?;

        let path = self.record_path(user_id);
        self.current(user_id, today, &path)
    }

    #[tracing::instrument(skip(self, usage), fields(topic = ?usage.topic()))]
    fn commit(
        &self,
        user_id: &str,
        today: NaiveDate,
        usage: &QueryUsage,
    ) -> ArchivistResult<UsageRecord> {
        let _lock = self.lock_user(user_id)?;

        let path = self.record_path(user_id);
        let mut record = match self.load(user_id, &path)? {
            Some(mut record) => {
                roll_over(&mut record, user_id, today);
                record
            }
            None => UsageRecord::new(user_id, today),
        };
        record.apply(usage);
        self.save(&path, &record)?;

        tracing::debug!(
            path = %path.display(),
            queries = *record.queries_count(),
            words = *record.words_count(),
            "Committed query usage"
        );
        Ok(record)
    }
}
