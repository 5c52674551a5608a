//! Mail record model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, require_field, require_storable};

/// Unique identifier for a mail record, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Create a new record ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of item is being held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailKind {
    /// A letter or envelope.
    Letter,
    /// A parcel.
    Package,
    /// Staff did not record the kind.
    #[default]
    Unspecified,
}

impl MailKind {
    /// Parse from database or user input. Anything unrecognized is `Unspecified`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "letter" => Self::Letter,
            "package" => Self::Package,
            _ => Self::Unspecified,
        }
    }

    /// Convert to database representation; `Unspecified` is stored as NULL.
    #[must_use]
    pub const fn as_db(&self) -> Option<&'static str> {
        match self {
            Self::Letter => Some("letter"),
            Self::Package => Some("package"),
            Self::Unspecified => None,
        }
    }

    /// Label shown to guests.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Letter => "Letter",
            Self::Package => "Package",
            Self::Unspecified => "Mail",
        }
    }
}

/// Pickup status of a mail record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailStatus {
    /// Waiting at the desk.
    #[default]
    Pending,
    /// Handed over to the guest.
    Received,
}

impl MailStatus {
    /// Parse from database string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "received" => Self::Received,
            _ => Self::Pending,
        }
    }

    /// Convert to database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Received => "received",
        }
    }

    /// Label shown to guests checking their mail.
    #[must_use]
    pub const fn guest_label(&self) -> &'static str {
        match self {
            Self::Pending => "Ready for pickup",
            Self::Received => "Picked up",
        }
    }
}

/// A logged item of mail held for a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailRecord {
    /// Store-assigned identifier; never changes.
    pub id: RecordId,
    /// Guest room number, normalized.
    pub room_number: String,
    /// Guest initials, normalized.
    pub initials: String,
    /// Letter, package or unspecified.
    pub kind: MailKind,
    /// Pickup status.
    pub status: MailStatus,
    /// When the item was logged. Staff may correct it through an edit.
    pub created_at: DateTime<Utc>,
}

impl MailRecord {
    /// Returns true once the guest has picked the item up.
    #[must_use]
    pub const fn is_received(&self) -> bool {
        matches!(self.status, MailStatus::Received)
    }
}

/// A mail record about to be inserted.
///
/// Always starts `Pending`; the store writes that status regardless of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    /// Guest room number, normalized.
    pub room_number: String,
    /// Guest initials, normalized.
    pub initials: String,
    /// Item kind.
    pub kind: MailKind,
    /// Creation timestamp, defaulting to now.
    pub created_at: DateTime<Utc>,
}

impl NewRecord {
    /// Normalize and validate a new record stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the room number or initials are blank.
    pub fn new(room_number: &str, initials: &str, kind: MailKind) -> Result<Self, ValidationError> {
        Ok(Self {
            room_number: require_field(room_number, ValidationError::EmptyRoomNumber)?,
            initials: require_field(initials, ValidationError::EmptyInitials)?,
            kind,
            created_at: Utc::now(),
        })
    }

    /// Override the creation timestamp.
    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Staff edit: every field independently optional, absent fields untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    /// New room number.
    pub room_number: Option<String>,
    /// New initials.
    pub initials: Option<String>,
    /// New kind.
    pub kind: Option<MailKind>,
    /// New status, including a move back to `Pending`.
    pub status: Option<MailStatus>,
    /// Corrected creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

impl RecordPatch {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the room number.
    #[must_use]
    pub fn room_number(mut self, room_number: impl Into<String>) -> Self {
        self.room_number = Some(room_number.into());
        self
    }

    /// Set the initials.
    #[must_use]
    pub fn initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = Some(initials.into());
        self
    }

    /// Set the kind.
    #[must_use]
    pub fn kind(mut self, kind: MailKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the status.
    #[must_use]
    pub fn status(mut self, status: MailStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the creation timestamp.
    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Check if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.room_number.is_none()
            && self.initials.is_none()
            && self.kind.is_none()
            && self.status.is_none()
            && self.created_at.is_none()
    }

    /// Reapply normalization to the identifying fields that are present.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if a present room number or initials would be
    /// blank, or if a present timestamp cannot be stored.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        let room_number = self
            .room_number
            .map(|room| require_field(&room, ValidationError::EmptyRoomNumber))
            .transpose()?;
        let initials = self
            .initials
            .map(|initials| require_field(&initials, ValidationError::EmptyInitials))
            .transpose()?;
        let created_at = self.created_at.map(require_storable).transpose()?;
        Ok(Self {
            room_number,
            initials,
            created_at,
            ..self
        })
    }
}
