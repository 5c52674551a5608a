//! Generation counter for stale-response suppression.

/// Identifies one issued query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Issues monotonically increasing tickets.
///
/// Only the most recently issued ticket is current. Issuing a new ticket or
/// calling [`Sequencer::invalidate`] makes every earlier one stale.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    generation: u64,
}

impl Sequencer {
    /// Create a sequencer with no tickets outstanding.
    #[must_use]
    pub const fn new() -> Self {
        Self { generation: 0 }
    }

    /// Issue a ticket for a new query.
    pub const fn issue(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        Ticket(self.generation)
    }

    /// Returns true if `ticket` is the newest one issued and not abandoned.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Abandon every in-flight ticket.
    pub const fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_ticket_is_current() {
        let mut seq = Sequencer::new();
        let first = seq.issue();
        let second = seq.issue();

        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn test_invalidate_abandons_in_flight() {
        let mut seq = Sequencer::new();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(ticket));

        let next = seq.issue();
        assert!(seq.is_current(next));
    }
}
