//! Record store adapter.
//!
//! The store owns persistence and arbitration between concurrent writers;
//! it holds no business rules. Every listing comes back newest first
//! (`created_at` descending), which is the only ordering callers rely on.

mod sqlite;

use std::future::Future;

use crate::Result;
use crate::record::{MailRecord, NewRecord, RecordId, RecordPatch};

pub use sqlite::SqliteRecordStore;

/// CRUD and ordered queries over mail records.
pub trait RecordStore: Send + Sync {
    /// All records, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<MailRecord>>> + Send;

    /// Records whose room number and initials equal the given (already
    /// normalized) values exactly, newest first.
    fn list_exact(
        &self,
        room_number: &str,
        initials: &str,
    ) -> impl Future<Output = Result<Vec<MailRecord>>> + Send;

    /// A single record by ID.
    fn get(&self, id: RecordId) -> impl Future<Output = Result<Option<MailRecord>>> + Send;

    /// Insert a record with `Pending` status and return it with its new ID.
    fn insert(&self, record: &NewRecord) -> impl Future<Output = Result<MailRecord>> + Send;

    /// Overwrite the fields present in `patch`.
    ///
    /// Returns false when no record matched `id`.
    fn update(
        &self,
        id: RecordId,
        patch: &RecordPatch,
    ) -> impl Future<Output = Result<bool>> + Send;
}
