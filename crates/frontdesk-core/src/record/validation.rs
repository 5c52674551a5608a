//! Field normalization and validation.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Validation error for mail record input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Room number is empty after normalization.
    EmptyRoomNumber,
    /// Initials are empty after normalization.
    EmptyInitials,
    /// Date filter is not a `YYYY-MM-DD` calendar date.
    InvalidDate,
    /// Timestamp falls outside years 0000 through 9999.
    TimestampOutOfRange,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyRoomNumber => "Room number is required",
            Self::EmptyInitials => "Initials are required",
            Self::InvalidDate => "Date must be in YYYY-MM-DD format",
            Self::TimestampOutOfRange => "Date must be between the years 0000 and 9999",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyRoomNumber => "room_number",
            Self::EmptyInitials => "initials",
            Self::InvalidDate => "date",
            Self::TimestampOutOfRange => "created_at",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Trim surrounding whitespace and uppercase.
///
/// Applied to room numbers and initials before storage and before any
/// comparison, so matching is insensitive to case and padding.
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalize a required field, failing with `error` when nothing is left.
///
/// # Errors
///
/// Returns `error` if the normalized value is empty.
pub fn require_field(value: &str, error: ValidationError) -> Result<String, ValidationError> {
    let normalized = normalize(value);
    if normalized.is_empty() {
        Err(error)
    } else {
        Ok(normalized)
    }
}

/// Parse an optional calendar date; blank input means "no date".
///
/// # Errors
///
/// Returns `ValidationError::InvalidDate` for non-blank input that is not `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate)
}

/// Check that a timestamp keeps its four-digit year when stored as text.
///
/// Outside that range the stored form gains a sign prefix, which neither
/// parses back nor sorts with the rest.
///
/// # Errors
///
/// Returns `ValidationError::TimestampOutOfRange` for years before 0000 or after 9999.
pub fn require_storable(at: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
    if (0..=9999).contains(&at.year()) {
        Ok(at)
    } else {
        Err(ValidationError::TimestampOutOfRange)
    }
}
