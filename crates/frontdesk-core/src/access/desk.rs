//! Role-scoped facades.
//!
//! A `GuestDesk` has no mutation methods at all, so guest code cannot reach
//! `create`, `mark_received` or `edit` even by mistake.

use chrono::Utc;
use chrono_tz::Tz;

use super::gate::{AccessGate, Role};
use crate::Result;
use crate::record::{MailKind, MailRecord, RecordId, RecordPatch};
use crate::report::PrintSnapshot;
use crate::service::{GuestLookup, Lifecycle, QueryEngine, StaffFilter};
use crate::store::RecordStore;

/// The operations available to one role.
#[derive(Debug)]
pub enum Desk<'a, S> {
    /// Staff: browse and mutate.
    Staff(StaffDesk<'a, S>),
    /// Guest: exact lookup only.
    Guest(GuestDesk<'a, S>),
}

impl AccessGate {
    /// Open the desk matching `role`.
    pub const fn open<S: RecordStore>(role: Role, store: &S, tz: Tz) -> Desk<'_, S> {
        match role {
            Role::Staff => Desk::Staff(StaffDesk::new(store, tz)),
            Role::Guest => Desk::Guest(GuestDesk::new(store, tz)),
        }
    }

    /// Open the staff desk.
    ///
    /// # Errors
    ///
    /// Returns `Error::Access` if `role` is not staff.
    pub fn staff<S: RecordStore>(role: Role, store: &S, tz: Tz) -> Result<StaffDesk<'_, S>> {
        Self::require_staff(role)?;
        Ok(StaffDesk::new(store, tz))
    }

    /// Open the guest desk.
    ///
    /// # Errors
    ///
    /// Returns `Error::Access` if `role` is staff; staff use the admin view.
    pub fn guest<S: RecordStore>(role: Role, store: &S, tz: Tz) -> Result<GuestDesk<'_, S>> {
        Self::require_guest(role)?;
        Ok(GuestDesk::new(store, tz))
    }
}

impl<S> Desk<'_, S> {
    /// The role this desk was opened for.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Staff(_) => Role::Staff,
            Self::Guest(_) => Role::Guest,
        }
    }
}

/// Staff operations: lifecycle actions, composite browse and print snapshot.
#[derive(Debug)]
pub struct StaffDesk<'a, S> {
    lifecycle: Lifecycle<'a, S>,
    queries: QueryEngine<'a, S>,
}

impl<'a, S: RecordStore> StaffDesk<'a, S> {
    const fn new(store: &'a S, tz: Tz) -> Self {
        Self {
            lifecycle: Lifecycle::new(store),
            queries: QueryEngine::new(store, tz),
        }
    }

    /// See [`Lifecycle::create`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` or `Error::Store`.
    pub async fn create(
        &self,
        room_number: &str,
        initials: &str,
        kind: MailKind,
    ) -> Result<MailRecord> {
        self.lifecycle.create(room_number, initials, kind).await
    }

    /// See [`Lifecycle::mark_received`].
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` or `Error::Store`.
    pub async fn mark_received(&self, id: RecordId) -> Result<()> {
        self.lifecycle.mark_received(id).await
    }

    /// See [`Lifecycle::edit`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation`, `Error::NotFound` or `Error::Store`.
    pub async fn edit(&self, id: RecordId, patch: RecordPatch) -> Result<()> {
        self.lifecycle.edit(id, patch).await
    }

    /// See [`QueryEngine::browse`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the listing fails.
    pub async fn browse(&self, filter: &StaffFilter) -> Result<Vec<MailRecord>> {
        self.queries.browse(filter).await
    }

    /// Printable listing of an already filtered result set, dated today.
    #[must_use]
    pub fn snapshot(&self, title: &str, records: &[MailRecord]) -> PrintSnapshot {
        let tz = self.queries.timezone();
        let today = Utc::now().with_timezone(&tz).date_naive();
        PrintSnapshot::from_records(title, records, tz, today)
    }
}

/// Guest operations: exact lookup and nothing else.
#[derive(Debug)]
pub struct GuestDesk<'a, S> {
    queries: QueryEngine<'a, S>,
}

impl<'a, S: RecordStore> GuestDesk<'a, S> {
    const fn new(store: &'a S, tz: Tz) -> Self {
        Self {
            queries: QueryEngine::new(store, tz),
        }
    }

    /// Look up mail for a room number and initials pair.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if either field is blank, or `Error::Store`
    /// if the query fails.
    pub async fn lookup(&self, room_number: &str, initials: &str) -> Result<Vec<MailRecord>> {
        let lookup = GuestLookup::new(room_number, initials)?;
        self.queries.lookup(&lookup).await
    }
}
