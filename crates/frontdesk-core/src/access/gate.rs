//! Role classification and route resolution.

use thiserror::Error;

/// External session, opaque to the core.
pub trait SessionSource {
    /// Returns true if a valid authenticated staff session is present.
    fn has_valid_session(&self) -> bool;

    /// End the session.
    ///
    /// # Errors
    ///
    /// Returns `Error::Session` if the session could not be ended.
    fn sign_out(&mut self) -> crate::Result<()>;
}

/// Who is at the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Authenticated staff member.
    Staff,
    /// Anonymous guest.
    Guest,
}

impl Role {
    /// Returns true for authenticated staff.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Staff)
    }
}

/// Screens a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Entry point; always forwards to the guest check.
    Root,
    /// Guest self-service lookup.
    Check,
    /// Staff listing and actions.
    Admin,
    /// Staff sign-in.
    Login,
}

/// Client-side gate refusals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A guest asked for a staff-only operation.
    #[error("staff sign-in required")]
    StaffOnly,
    /// Staff asked for the guest self-service flow.
    #[error("signed-in staff use the admin view")]
    GuestOnly,
}

/// Binary classifier over the external session.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate;

impl AccessGate {
    /// Derive the role from the session.
    #[must_use]
    pub fn classify(session: &impl SessionSource) -> Role {
        if session.has_valid_session() {
            Role::Staff
        } else {
            Role::Guest
        }
    }

    /// Where a request for `requested` actually lands for `role`.
    ///
    /// Staff never see the guest lookup and guests never see the admin view.
    #[must_use]
    pub const fn resolve(role: Role, requested: Route) -> Route {
        match (role, requested) {
            (Role::Staff, Route::Root | Route::Check | Route::Login | Route::Admin) => Route::Admin,
            (Role::Guest, Route::Admin | Route::Login) => Route::Login,
            (Role::Guest, Route::Root | Route::Check) => Route::Check,
        }
    }

    /// Require a staff role.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::StaffOnly` for guests.
    pub const fn require_staff(role: Role) -> Result<(), AccessError> {
        match role {
            Role::Staff => Ok(()),
            Role::Guest => Err(AccessError::StaffOnly),
        }
    }

    /// Require the anonymous guest role.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::GuestOnly` for staff.
    pub const fn require_guest(role: Role) -> Result<(), AccessError> {
        match role {
            Role::Guest => Ok(()),
            Role::Staff => Err(AccessError::GuestOnly),
        }
    }
}
