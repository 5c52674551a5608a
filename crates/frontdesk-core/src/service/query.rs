//! Query/filter engine.
//!
//! Two separate operations over the same record shape:
//!
//! - [`QueryEngine::browse`] is the staff view: free-text substring search on
//!   room number or initials, combined with status and calendar-date filters.
//! - [`QueryEngine::lookup`] is the guest view: room number and initials must
//!   both match exactly. A partial room number never matches, so one guest
//!   cannot discover another guest's mail.
//!
//! The two are kept as distinct operations so the guest path can never be
//! loosened by flipping a parameter.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::debug;

use crate::Result;
use crate::record::{MailRecord, MailStatus, ValidationError, normalize, parse_date, require_field};
use crate::store::RecordStore;

/// Status filter for the staff view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every status.
    #[default]
    All,
    /// Only items still at the desk.
    Pending,
    /// Only items already picked up.
    Received,
}

impl StatusFilter {
    /// Parse from user input. Anything unrecognized is `All`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "received" => Self::Received,
            _ => Self::All,
        }
    }

    /// Returns true if a record with `status` passes this filter.
    #[must_use]
    pub const fn matches(self, status: MailStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => matches!(status, MailStatus::Pending),
            Self::Received => matches!(status, MailStatus::Received),
        }
    }
}

/// Composite staff filter. The default value lets every record through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffFilter {
    /// Substring matched against room number or initials, case-insensitively.
    pub search: String,
    /// Status restriction.
    pub status: StatusFilter,
    /// Calendar date compared with the local date part of `created_at`.
    pub date: Option<NaiveDate>,
}

impl StaffFilter {
    /// Create a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Set the status filter.
    #[must_use]
    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Set the date filter.
    #[must_use]
    pub fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    /// Set the date filter from `YYYY-MM-DD` text; blank clears it.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidDate` for non-blank text that is not a date.
    pub fn with_date_str(self, date: &str) -> std::result::Result<Self, ValidationError> {
        Ok(self.date(parse_date(date)?))
    }

    /// Returns true when any filter is narrower than the default.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status != StatusFilter::All || self.date.is_some()
    }

    /// Reset every filter to its always-true default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check one record against all three predicates.
    #[must_use]
    pub fn matches(&self, record: &MailRecord, tz: Tz) -> bool {
        let term = normalize(&self.search);
        let matches_search = term.is_empty()
            || record.room_number.to_uppercase().contains(&term)
            || record.initials.to_uppercase().contains(&term);

        let matches_date = self
            .date
            .is_none_or(|date| record.created_at.with_timezone(&tz).date_naive() == date);

        matches_search && self.status.matches(record.status) && matches_date
    }

    /// Keep the records that match, preserving their order.
    #[must_use]
    pub fn apply(&self, records: Vec<MailRecord>, tz: Tz) -> Vec<MailRecord> {
        records
            .into_iter()
            .filter(|record| self.matches(record, tz))
            .collect()
    }
}

/// Guest lookup input: both fields required, normalized on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestLookup {
    room_number: String,
    initials: String,
}

impl GuestLookup {
    /// Normalize and validate a guest's room number and initials.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if either field is blank.
    pub fn new(room_number: &str, initials: &str) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            room_number: require_field(room_number, ValidationError::EmptyRoomNumber)?,
            initials: require_field(initials, ValidationError::EmptyInitials)?,
        })
    }

    /// Normalized room number.
    #[must_use]
    pub fn room_number(&self) -> &str {
        &self.room_number
    }

    /// Normalized initials.
    #[must_use]
    pub fn initials(&self) -> &str {
        &self.initials
    }
}

/// Read-only queries over a record store.
#[derive(Debug)]
pub struct QueryEngine<'a, S> {
    store: &'a S,
    tz: Tz,
}

impl<'a, S: RecordStore> QueryEngine<'a, S> {
    /// Create an engine that evaluates calendar dates in `tz`.
    pub const fn new(store: &'a S, tz: Tz) -> Self {
        Self { store, tz }
    }

    /// The presentation time zone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// Staff browse: every record passing `filter`, newest first.
    ///
    /// Ordering comes from the store; the filter only removes records.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the listing fails.
    pub async fn browse(&self, filter: &StaffFilter) -> Result<Vec<MailRecord>> {
        let records = self.store.list().await?;
        let total = records.len();
        let filtered = filter.apply(records, self.tz);
        debug!("Staff browse kept {} of {} records", filtered.len(), total);
        Ok(filtered)
    }

    /// Guest lookup: records whose room number and initials both match
    /// exactly, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the query fails.
    pub async fn lookup(&self, lookup: &GuestLookup) -> Result<Vec<MailRecord>> {
        let records = self
            .store
            .list_exact(&lookup.room_number, &lookup.initials)
            .await?;
        debug!("Guest lookup returned {} records", records.len());
        Ok(records)
    }
}
