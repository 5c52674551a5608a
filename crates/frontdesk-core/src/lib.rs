//! # frontdesk-core
//!
//! Core logic for tracking guest mail held at a front desk.
//!
//! This crate provides:
//! - Mail record model, normalization and validation
//! - Record store adapter (`SQLite`)
//! - Mail lifecycle (create, mark received, staff edit)
//! - Query engine: staff composite filter and guest exact lookup
//! - Access gate with role-scoped staff and guest desks
//! - Result boards with stale-response suppression
//! - Printable listing snapshots and user-facing notices

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod access;
pub mod board;
mod error;
pub mod notice;
pub mod record;
pub mod report;
pub mod service;
pub mod store;

pub use access::{
    AccessError, AccessGate, Desk, GuestDesk, Role, Route, SessionSource, StaffDesk,
};
pub use board::{GuestBoard, LookupState, Sequencer, StaffBoard, Ticket};
pub use error::{Error, Result};
pub use notice::{Action, Notice};
pub use record::{
    MailKind, MailRecord, MailStatus, NewRecord, RecordId, RecordPatch, ValidationError, normalize,
};
pub use report::{PrintRow, PrintSnapshot};
pub use service::{GuestLookup, Lifecycle, QueryEngine, StaffFilter, StatusFilter};
pub use store::{RecordStore, SqliteRecordStore};
