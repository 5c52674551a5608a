//! Caller-side result state.
//!
//! Queries are issued asynchronously and may resolve out of order. Each board
//! hands out a [`Ticket`] when a query starts and only applies the response
//! carrying the newest ticket, so a slow earlier query never overwrites a
//! faster later one.

mod guest;
mod sequence;
mod staff;

pub use guest::{GuestBoard, LookupState};
pub use sequence::{Sequencer, Ticket};
pub use staff::StaffBoard;
