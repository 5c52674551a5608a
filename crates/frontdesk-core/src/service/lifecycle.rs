//! Mail lifecycle: create, mark received, edit.
//!
//! States are `Pending` and `Received`. `mark_received` only moves forward;
//! `edit` is the explicit staff escape hatch that may overwrite any field,
//! including moving a record back to `Pending` or correcting its timestamp.

use tracing::{debug, info};

use crate::record::{MailKind, MailRecord, MailStatus, NewRecord, RecordId, RecordPatch};
use crate::store::RecordStore;
use crate::{Error, Result};

/// Staff mutations over mail records.
#[derive(Debug)]
pub struct Lifecycle<'a, S> {
    store: &'a S,
}

impl<'a, S: RecordStore> Lifecycle<'a, S> {
    /// Create a lifecycle service over the given store.
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Log a newly arrived item as `Pending`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the room number or initials are blank
    /// after normalization, or `Error::Store` if the insert fails.
    pub async fn create(
        &self,
        room_number: &str,
        initials: &str,
        kind: MailKind,
    ) -> Result<MailRecord> {
        let record = NewRecord::new(room_number, initials, kind)?;
        let created = self.store.insert(&record).await?;
        info!(
            "Logged mail record {} for room {}",
            created.id, created.room_number
        );
        Ok(created)
    }

    /// Mark an item as picked up.
    ///
    /// Idempotent: a record that is already `Received` stays that way and the
    /// call succeeds. `created_at` is never touched.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if `id` does not resolve, or `Error::Store`
    /// if the update fails.
    pub async fn mark_received(&self, id: RecordId) -> Result<()> {
        let patch = RecordPatch::new().status(MailStatus::Received);
        if !self.store.update(id, &patch).await? {
            return Err(Error::NotFound(id));
        }
        info!("Marked mail record {id} as received");
        Ok(())
    }

    /// Overwrite any subset of a record's fields.
    ///
    /// Room number and initials are normalized again before the write. An
    /// empty patch only checks that the record exists.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if a supplied room number or initials would
    /// be blank, `Error::NotFound` if `id` does not resolve, or `Error::Store`
    /// if the update fails.
    pub async fn edit(&self, id: RecordId, patch: RecordPatch) -> Result<()> {
        let patch = patch.normalized()?;
        if patch.is_empty() {
            debug!("Empty edit for mail record {id}");
        }
        if !self.store.update(id, &patch).await? {
            return Err(Error::NotFound(id));
        }
        info!("Edited mail record {id}");
        Ok(())
    }
}
