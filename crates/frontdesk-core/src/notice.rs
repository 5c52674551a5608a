//! Short user-facing notices for the outcome of each action.
//!
//! Failure text never includes store detail; a store refusal reads the same
//! as a network failure.

use crate::Error;

/// A user-visible action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Staff listing refresh.
    Fetch,
    /// Guest lookup.
    Lookup,
    /// Logging a new item.
    Create,
    /// Marking an item picked up.
    MarkReceived,
    /// Staff edit.
    Edit,
    /// Ending the staff session.
    SignOut,
}

impl Action {
    /// Text shown when the action succeeds, if any.
    #[must_use]
    pub const fn success(self) -> Option<&'static str> {
        match self {
            Self::Create => Some("Post added successfully"),
            Self::MarkReceived => Some("Post marked as received"),
            Self::Edit => Some("Post updated successfully"),
            Self::Fetch | Self::Lookup | Self::SignOut => None,
        }
    }

    /// Text shown when the action fails.
    #[must_use]
    pub const fn failure(self) -> &'static str {
        match self {
            Self::Fetch => "Failed to fetch posts",
            Self::Lookup => "Failed to fetch posts. Please try again.",
            Self::Create => "Failed to add post",
            Self::MarkReceived => "Failed to update post status",
            Self::Edit => "Failed to update post",
            Self::SignOut => "Failed to log out",
        }
    }
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// The action succeeded.
    Success,
    /// The action failed; prior results stay on screen.
    Error,
}

/// A short notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: Level,
    /// Human-readable text.
    pub text: String,
}

impl Notice {
    /// Success notice for `action`, if that action announces success.
    #[must_use]
    pub fn success(action: Action) -> Option<Self> {
        action.success().map(|text| Self {
            level: Level::Success,
            text: text.to_string(),
        })
    }

    /// Failure notice for `action`.
    ///
    /// Validation problems name the offending field; everything else uses the
    /// action's fixed failure text.
    #[must_use]
    pub fn from_error(action: Action, error: &Error) -> Self {
        let text = match error {
            Error::Validation(e) => e.message().to_string(),
            Error::NotFound(_) | Error::Store(_) | Error::Access(_) | Error::Session(_) => {
                action.failure().to_string()
            }
        };
        Self {
            level: Level::Error,
            text,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordId, ValidationError};

    #[test]
    fn test_success_text() {
        assert_eq!(
            Notice::success(Action::Create).map(|n| n.text),
            Some("Post added successfully".to_string())
        );
        assert!(Notice::success(Action::Fetch).is_none());
    }

    #[test]
    fn test_store_denial_uses_generic_text() {
        let denied = Error::from(sqlx::Error::Protocol("row-level policy violated".into()));
        let missing = Error::NotFound(RecordId::new(5));

        let a = Notice::from_error(Action::MarkReceived, &denied);
        let b = Notice::from_error(Action::MarkReceived, &missing);
        assert_eq!(a, b);
        assert_eq!(a.text, "Failed to update post status");
        assert_eq!(a.level, Level::Error);
    }

    #[test]
    fn test_validation_names_field() {
        let err = Error::Validation(ValidationError::EmptyRoomNumber);
        assert_eq!(
            Notice::from_error(Action::Create, &err).text,
            "Room number is required"
        );
    }
}
