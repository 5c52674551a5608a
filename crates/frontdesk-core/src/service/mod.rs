//! Staff-facing lifecycle actions and the two query modes.
//!
//! Both services borrow a [`RecordStore`](crate::store::RecordStore) and keep
//! no state of their own. Callers holding a result set must re-query after
//! any successful mutation.

mod lifecycle;
mod query;

pub use lifecycle::Lifecycle;
pub use query::{GuestLookup, QueryEngine, StaffFilter, StatusFilter};
