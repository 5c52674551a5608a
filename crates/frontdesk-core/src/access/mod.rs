//! Access gate: staff versus guest.
//!
//! The gate decides which query mode and which mutations a caller may reach.
//! It is routing for the user experience only. The record store's own
//! access policy is the security boundary and must reject guest mutations
//! on its side regardless of what this gate allows.

mod desk;
mod gate;

pub use desk::{Desk, GuestDesk, StaffDesk};
pub use gate::{AccessError, AccessGate, Role, Route, SessionSource};
