//! In-memory usage store.

use crate::{UsageStore, roll_over};
use archivist_core::{QueryUsage, UsageRecord};
use archivist_error::ArchivistResult;
use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

type Slot = Arc<Mutex<UsageRecord>>;

/// Process-local usage store.
///
/// Each user gets a slot guarded by its own mutex. The outer map lock is held
/// only long enough to find or insert a slot, so users never wait on each
/// other's reads and commits.
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    records: RwLock<HashMap<String, Slot>>,
}

impl InMemoryUsageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        tracing::debug!("Creating in-memory usage store");
        Self::default()
    }

    /// The stored record for `user_id`, whatever its date, without creating
    /// or rolling anything over.
    pub fn peek(&self, user_id: &str) -> Option<UsageRecord> {
        let slot = self.records.read().get(user_id).cloned()?;
        let record = slot.lock().clone();
        Some(record)
    }

    /// Number of users with a stored record.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether no user has a stored record.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn slot(&self, user_id: &str, today: NaiveDate) -> Slot {
        if let Some(slot) = self.records.read().get(user_id) {
            return Arc::clone(slot);
        }

        let mut records = self.records.write();
        let slot = records.entry(user_id.to_string()).or_insert_with(|| {
            tracing::debug!(user_id, %today, "Creating usage record");
            Arc::new(Mutex::new(UsageRecord::new(user_id, today)))
        });
        Arc::clone(slot)
    }
}

impl UsageStore for InMemoryUsageStore {
    #[tracing::instrument(skip(self))]
    fn get_or_create(&self, user_id: &str, today: NaiveDate) -> ArchivistResult<UsageRecord> {
        let slot = self.slot(user_id, today);
        let mut record = slot.lock();
        roll_over(&mut record, user_id, today);
        Ok(record.clone())
    }

    #[tracing::instrument(skip(self, usage), fields(topic = ?usage.topic()))]
    fn commit(
        &self,
        user_id: &str,
        today: NaiveDate,
        usage: &QueryUsage,
    ) -> ArchivistResult<UsageRecord> {
        let slot = self.slot(user_id, today);
        let mut record = slot.lock();
        roll_over(&mut record, user_id, today);
        record.apply(usage);

        tracing::debug!(
            queries = *record.queries_count(),
            words = *record.words_count(),
            "Committed query usage"
        );
        Ok(record.clone())
    }
}
