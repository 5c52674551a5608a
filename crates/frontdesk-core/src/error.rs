//! Error types for the core library.

use thiserror::Error;

use crate::access::AccessError;
use crate::record::{RecordId, ValidationError};

/// Errors that can occur in core operations.
///
/// Every variant is recoverable: an operation that fails leaves the caller's
/// previously fetched results untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input, such as an empty room number.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The mutation target does not exist.
    #[error("Mail record not found: {0}")]
    NotFound(RecordId),

    /// Record store failure.
    ///
    /// Transport failures, timeouts and policy denials all render the same
    /// text so a refused request reveals nothing about which records exist.
    #[error("Record store request failed")]
    Store(#[source] sqlx::Error),

    /// The client-side gate refused the operation for this role.
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    /// The external session could not be signed out.
    #[error("Session error: {0}")]
    Session(String),
}

impl Error {
    /// Returns true for malformed-input errors.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true when the mutation target did not resolve.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true for record store failures.
    #[must_use]
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Self::Store(e)
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
