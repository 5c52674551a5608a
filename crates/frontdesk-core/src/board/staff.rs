//! Staff listing state.

use tracing::{debug, warn};

use super::sequence::{Sequencer, Ticket};
use crate::Result;
use crate::access::StaffDesk;
use crate::notice::{Action, Notice};
use crate::record::MailRecord;
use crate::service::StaffFilter;
use crate::store::RecordStore;

/// The staff result set, its active filter, and fetch bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct StaffBoard {
    filter: StaffFilter,
    records: Vec<MailRecord>,
    sequencer: Sequencer,
    is_loading: bool,
    needs_refresh: bool,
}

impl StaffBoard {
    /// Create an empty board with the always-true filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active filter.
    #[must_use]
    pub const fn filter(&self) -> &StaffFilter {
        &self.filter
    }

    /// Replace the active filter.
    ///
    /// Any query started under the old filter is abandoned.
    pub fn set_filter(&mut self, filter: StaffFilter) {
        self.filter = filter;
        self.sequencer.invalidate();
        self.is_loading = false;
        self.needs_refresh = true;
    }

    /// Reset every filter field.
    pub fn clear_filter(&mut self) {
        self.set_filter(StaffFilter::default());
    }

    /// The last successfully applied results.
    #[must_use]
    pub fn records(&self) -> &[MailRecord] {
        &self.records
    }

    /// Returns true while a query is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Returns true when displayed results may be out of date.
    #[must_use]
    pub const fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Mark results stale after a successful mutation.
    ///
    /// A query started before the mutation is abandoned, so its response
    /// cannot clear the flag.
    pub const fn invalidate(&mut self) {
        self.sequencer.invalidate();
        self.is_loading = false;
        self.needs_refresh = true;
    }

    /// Start a query and return its ticket.
    pub const fn begin(&mut self) -> Ticket {
        self.is_loading = true;
        self.sequencer.issue()
    }

    /// Apply a query result if `ticket` is still current.
    ///
    /// Stale results are dropped silently. A failure keeps the previous
    /// results on screen and returns a failure notice.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<MailRecord>>,
    ) -> Option<Notice> {
        if !self.sequencer.is_current(ticket) {
            debug!(?ticket, "Discarding stale listing response");
            return None;
        }

        self.is_loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.needs_refresh = false;
                None
            }
            Err(e) => {
                warn!(error = %e, "Listing refresh failed, keeping previous results");
                Some(Notice::from_error(Action::Fetch, &e))
            }
        }
    }

    /// Fetch through `desk` with the active filter and apply the result.
    pub async fn refresh<S: RecordStore>(&mut self, desk: &StaffDesk<'_, S>) -> Option<Notice> {
        let ticket = self.begin();
        let result = desk.browse(&self.filter).await;
        self.complete(ticket, result)
    }

    /// `"Showing N posts"`.
    #[must_use]
    pub fn count_label(&self) -> String {
        format!("Showing {} posts", self.records.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::access::{AccessGate, Role};
    use crate::record::{MailKind, MailStatus, RecordId};
    use crate::store::SqliteRecordStore;
    use chrono::Utc;
    use chrono_tz::Tz;

    fn record(id: i64, room: &str) -> MailRecord {
        MailRecord {
            id: RecordId::new(id),
            room_number: room.to_string(),
            initials: "AB".to_string(),
            kind: MailKind::Unspecified,
            status: MailStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_slow_earlier_response_is_discarded() {
        let mut board = StaffBoard::new();
        let slow = board.begin();
        let fast = board.begin();

        assert!(board.complete(fast, Ok(vec![record(2, "102")])).is_none());
        assert!(board.complete(slow, Ok(vec![record(1, "101")])).is_none());

        assert_eq!(board.records().len(), 1);
        assert_eq!(board.records()[0].room_number, "102");
        assert!(!board.is_loading());
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let mut board = StaffBoard::new();
        let ticket = board.begin();
        board.complete(ticket, Ok(vec![record(1, "101")]));

        let ticket = board.begin();
        let notice = board
            .complete(ticket, Err(Error::NotFound(RecordId::new(9))))
            .unwrap();

        assert_eq!(notice.text, "Failed to fetch posts");
        assert_eq!(board.records().len(), 1);
        assert_eq!(board.count_label(), "Showing 1 posts");
    }

    #[test]
    fn test_filter_change_abandons_in_flight() {
        let mut board = StaffBoard::new();
        let ticket = board.begin();
        board.set_filter(StaffFilter::new().search("101"));

        board.complete(ticket, Ok(vec![record(1, "999")]));
        assert!(board.records().is_empty());
        assert!(board.needs_refresh());
        assert!(board.filter().is_active());

        board.clear_filter();
        assert!(!board.filter().is_active());
    }

    #[tokio::test]
    async fn test_response_from_before_mutation_is_discarded() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        let desk = AccessGate::staff(Role::Staff, &store, Tz::UTC).unwrap();
        let mut board = StaffBoard::new();

        let ticket = board.begin();
        let before = desk.browse(board.filter()).await;
        desk.create("101", "AB", MailKind::Letter).await.unwrap();
        board.invalidate();

        assert!(board.complete(ticket, before).is_none());
        assert!(board.needs_refresh());
        assert!(!board.is_loading());
        assert!(board.records().is_empty());

        board.refresh(&desk).await;
        assert!(!board.needs_refresh());
        assert_eq!(board.records().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_through_desk() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        let desk = AccessGate::staff(Role::Staff, &store, Tz::UTC).unwrap();
        desk.create("101", "ab", MailKind::Letter).await.unwrap();

        let mut board = StaffBoard::new();
        board.invalidate();
        assert!(board.refresh(&desk).await.is_none());
        assert_eq!(board.count_label(), "Showing 1 posts");
        assert!(!board.needs_refresh());
    }
}
