//! Per-user, per-day usage storage for Archivist.
//!
//! The tier engine only ever talks to the [`UsageStore`] trait, so tests can
//! run against [`InMemoryUsageStore`] while deployments persist records with
//! [`FileUsageStore`] (or any other keyed store implementing the trait).
//!
//! # Day rollover
//!
//! Every store keeps at most one record per user. When a request arrives with
//! a `today` that differs from the stored record's date, the stored record is
//! discarded and replaced by a zeroed one. The date check and the replacement
//! happen under the same per-user lock as the read, so a request straddling
//! midnight is never checked against yesterday's counters and recorded
//! against today's.
//!
//! # Example
//!
//! ```rust
//! use archivist_core::QueryUsage;
//! use archivist_storage::{InMemoryUsageStore, UsageStore};
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryUsageStore::new();
//! let today = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
//!
//! let record = store.get_or_create("reader-1", today)?;
//! assert_eq!(*record.queries_count(), 0);
//!
//! let at = Utc.with_ymd_and_hms(2024, 6, 16, 8, 30, 0).unwrap();
//! let record = store.commit("reader-1", today, &QueryUsage::new(Some("soweto"), 320, at))?;
//! assert_eq!(*record.queries_count(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;

pub use archivist_error::{StorageError, StorageErrorKind};
pub use filesystem::FileUsageStore;
pub use memory::InMemoryUsageStore;

use archivist_core::{QueryUsage, UsageRecord};
use archivist_error::ArchivistResult;
use chrono::NaiveDate;
use std::sync::Arc;

/// Keyed storage of one usage record per user.
///
/// Implementations hold no business logic beyond day rollover and applying a
/// completed query to the counters. Both operations must be atomic per user;
/// operations for different users must not block each other.
pub trait UsageStore: Send + Sync {
    /// Returns the user's record for `today`.
    ///
    /// Creates a zeroed record if none exists or if the stored one belongs to
    /// another day; the old record is discarded, not archived.
    fn get_or_create(&self, user_id: &str, today: NaiveDate) -> ArchivistResult<UsageRecord>;

    /// Adds one completed query to the user's record for `today`.
    ///
    /// Not idempotent: every call counts as one more query. Rolls the record
    /// over first if it belongs to another day. Returns the updated record.
    fn commit(
        &self,
        user_id: &str,
        today: NaiveDate,
        usage: &QueryUsage,
    ) -> ArchivistResult<UsageRecord>;
}

impl<S: UsageStore + ?Sized> UsageStore for Arc<S> {
    fn get_or_create(&self, user_id: &str, today: NaiveDate) -> ArchivistResult<UsageRecord> {
        (**self).get_or_create(user_id, today)
    }

    fn commit(
        &self,
        user_id: &str,
        today: NaiveDate,
        usage: &QueryUsage,
    ) -> ArchivistResult<UsageRecord> {
        (**self).commit(user_id, today, usage)
    }
}

/// Replaces `record` with a zeroed one if it is not for `today`.
///
/// Returns whether a rollover happened.
fn roll_over(record: &mut UsageRecord, user_id: &str, today: NaiveDate) -> bool {
    if record.is_for(today) {
        return false;
    }
    tracing::debug!(
        user_id,
        stale_date = %record.date(),
        %today,
        "Discarding usage record from another day"
    );
    *record = UsageRecord::new(user_id, today);
    true
}
