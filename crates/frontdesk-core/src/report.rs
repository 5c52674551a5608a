//! Printable listing snapshot.
//!
//! Built from whatever result set is currently displayed, in the order it is
//! displayed. Rows keep only what belongs on a sheet at the desk.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use crate::record::MailRecord;

/// Date format used on printed listings (`dd-mm-yyyy`).
pub const PRINT_DATE_FORMAT: &str = "%d-%m-%Y";

/// One printed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintRow {
    /// Room number.
    pub room_number: String,
    /// Guest initials.
    pub initials: String,
    /// Local date the item was logged, `dd-mm-yyyy`.
    pub date: String,
}

/// A printable listing taken at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintSnapshot {
    /// Sheet heading.
    pub title: String,
    /// Day the sheet was produced.
    pub printed_on: NaiveDate,
    /// Rows in display order.
    pub rows: Vec<PrintRow>,
}

impl PrintSnapshot {
    /// Reduce `records` to printable rows without re-sorting them.
    #[must_use]
    pub fn from_records(
        title: impl Into<String>,
        records: &[MailRecord],
        tz: Tz,
        printed_on: NaiveDate,
    ) -> Self {
        let rows = records
            .iter()
            .map(|record| PrintRow {
                room_number: record.room_number.clone(),
                initials: record.initials.clone(),
                date: record
                    .created_at
                    .with_timezone(&tz)
                    .format(PRINT_DATE_FORMAT)
                    .to_string(),
            })
            .collect();

        Self {
            title: title.into(),
            printed_on,
            rows,
        }
    }

    /// The print date, formatted like the row dates.
    #[must_use]
    pub fn printed_on_label(&self) -> String {
        self.printed_on.format(PRINT_DATE_FORMAT).to_string()
    }

    /// Returns true if there is nothing to print.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as a plain aligned table.
    #[must_use]
    pub fn to_text(&self) -> String {
        let room_width = self
            .rows
            .iter()
            .map(|row| row.room_number.chars().count())
            .fold(ROOM_HEADER.len(), usize::max);
        let initials_width = self
            .rows
            .iter()
            .map(|row| row.initials.chars().count())
            .fold(INITIALS_HEADER.len(), usize::max);

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str("Date: ");
        out.push_str(&self.printed_on_label());
        out.push_str("\n\n");
        out.push_str(&format!(
            "{ROOM_HEADER:<room_width$}  {INITIALS_HEADER:<initials_width$}  {DATE_HEADER}\n"
        ));
        for row in &self.rows {
            out.push_str(&format!(
                "{:<room_width$}  {:<initials_width$}  {}\n",
                row.room_number, row.initials, row.date
            ));
        }
        out
    }
}

const ROOM_HEADER: &str = "Room";
const INITIALS_HEADER: &str = "Initials";
const DATE_HEADER: &str = "Date";
