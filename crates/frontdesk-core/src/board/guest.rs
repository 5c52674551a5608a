//! Guest lookup state.

use tracing::{debug, warn};

use super::sequence::{Sequencer, Ticket};
use crate::Result;
use crate::access::GuestDesk;
use crate::notice::{Action, Notice};
use crate::record::{MailRecord, normalize};
use crate::store::RecordStore;

/// Whether a lookup has been attempted for the current inputs.
///
/// Distinguishes "no mail" from "not yet searched" and from "could not check".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LookupState {
    /// No lookup has reached the store since the inputs last changed.
    #[default]
    NotSearched,
    /// A lookup completed with these results, possibly none.
    Searched(Vec<MailRecord>),
    /// A lookup was sent but the store request failed.
    Failed,
}

impl LookupState {
    /// Returns true once a lookup has been attempted, whether or not it succeeded.
    #[must_use]
    pub const fn has_searched(&self) -> bool {
        !matches!(self, Self::NotSearched)
    }
}

/// The guest check form and its last result.
#[derive(Debug, Clone, Default)]
pub struct GuestBoard {
    room_number: String,
    initials: String,
    state: LookupState,
    sequencer: Sequencer,
    is_loading: bool,
}

impl GuestBoard {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Room number as typed.
    #[must_use]
    pub fn room_number(&self) -> &str {
        &self.room_number
    }

    /// Initials as typed.
    #[must_use]
    pub fn initials(&self) -> &str {
        &self.initials
    }

    /// Update the room number input.
    pub fn set_room_number(&mut self, value: impl Into<String>) {
        self.room_number = value.into();
        self.reset();
    }

    /// Update the initials input.
    pub fn set_initials(&mut self, value: impl Into<String>) {
        self.initials = value.into();
        self.reset();
    }

    fn reset(&mut self) {
        self.state = LookupState::NotSearched;
        self.sequencer.invalidate();
        self.is_loading = false;
    }

    /// Current lookup state.
    #[must_use]
    pub const fn state(&self) -> &LookupState {
        &self.state
    }

    /// Returns true while a lookup is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Start a lookup and return its ticket.
    pub const fn begin(&mut self) -> Ticket {
        self.is_loading = true;
        self.sequencer.issue()
    }

    /// Apply a lookup result if `ticket` is still current.
    ///
    /// Every failure returns a notice. A store failure moves the state to
    /// `Failed`; blank inputs never reach the store and leave it unchanged.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<MailRecord>>,
    ) -> Option<Notice> {
        if !self.sequencer.is_current(ticket) {
            debug!(?ticket, "Discarding stale lookup response");
            return None;
        }

        self.is_loading = false;
        match result {
            Ok(records) => {
                self.state = LookupState::Searched(records);
                None
            }
            Err(e) => {
                if !e.is_validation() {
                    warn!(error = %e, "Guest lookup failed");
                    self.state = LookupState::Failed;
                }
                Some(Notice::from_error(Action::Lookup, &e))
            }
        }
    }

    /// Run the lookup for the current inputs through `desk`.
    pub async fn search<S: RecordStore>(&mut self, desk: &GuestDesk<'_, S>) -> Option<Notice> {
        let ticket = self.begin();
        let result = desk.lookup(&self.room_number, &self.initials).await;
        self.complete(ticket, result)
    }

    /// Result heading, once a lookup has completed successfully.
    ///
    /// `"Mail found for Room R - I"` or `"No mail found for Room R - I"`.
    #[must_use]
    pub fn headline(&self) -> Option<String> {
        let LookupState::Searched(records) = &self.state else {
            return None;
        };
        let room = normalize(&self.room_number);
        let initials = normalize(&self.initials);
        Some(if records.is_empty() {
            format!("No mail found for Room {room} - {initials}")
        } else {
            format!("Mail found for Room {room} - {initials}")
        })
    }
}
