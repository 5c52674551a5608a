//! Plain-text views for the terminal.

use std::fmt::Write;

use chrono_tz::Tz;
use frontdesk_core::{GuestBoard, LookupState, MailRecord, StaffBoard};

const STAFF_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const GUEST_DATE_FORMAT: &str = "%d-%m-%Y";

/// Staff listing: one row per record plus the count line.
pub fn staff_listing(board: &StaffBoard, tz: Tz) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<8}  {:<8}  {:<8}  {:<9}  Logged",
        "ID", "Room", "Initials", "Type", "Status"
    );
    for record in board.records() {
        let _ = writeln!(out, "{}", staff_row(record, tz));
    }
    let _ = writeln!(out, "{}", board.count_label());
    out
}

fn staff_row(record: &MailRecord, tz: Tz) -> String {
    format!(
        "{:>6}  {:<8}  {:<8}  {:<8}  {:<9}  {}",
        record.id,
        record.room_number,
        record.initials,
        record.kind.label(),
        record.status.as_str(),
        record.created_at.with_timezone(&tz).format(STAFF_TIME_FORMAT)
    )
}

/// Guest lookup result: headline followed by each item's pickup state.
pub fn guest_results(board: &GuestBoard, tz: Tz) -> String {
    let mut out = String::new();
    let Some(headline) = board.headline() else {
        return out;
    };
    let _ = writeln!(out, "{headline}");

    if let LookupState::Searched(records) = board.state() {
        for record in records {
            let _ = writeln!(
                out,
                "  {:<8}  {:<16}  {}",
                record.kind.label(),
                record.status.guest_label(),
                record.created_at.with_timezone(&tz).format(GUEST_DATE_FORMAT)
            );
        }
    }
    out
}
