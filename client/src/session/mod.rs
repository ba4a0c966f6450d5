//! Data structures for the authenticated session.
//!
//! This module defines the session model shared by the session client and the
//! asset loader: the bearer token, the principal's role, and the principal's
//! numeric identifier. The three values are created together on login and
//! destroyed together on logout or on a detected authorization failure.

pub mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

/// Role of the authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Standard storefront user (wire value 0).
    Customer,
    /// Back-office administrator (wire value 1).
    Admin,
}

impl Role {
    /// Maps the backend's integer discriminator onto a role. Any value other
    /// than 1 is a standard user.
    pub fn from_wire(value: i64) -> Self {
        if value == 1 { Role::Admin } else { Role::Customer }
    }

    /// The persisted storage code (`"1"` = administrator, else standard user).
    pub fn code(&self) -> &'static str {
        match self {
            Role::Admin => "1",
            Role::Customer => "0",
        }
    }

    /// Parses a persisted storage code.
    pub fn from_code(code: &str) -> Self {
        if code.trim() == "1" {
            Role::Admin
        } else {
            Role::Customer
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// An authenticated session. Absence of a `Session` means the client is
/// anonymous; there is no partially-populated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer credential. Never interpreted client-side.
    pub token: String,
    pub role: Role,
    pub user_id: i64,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role, user_id: i64) -> Self {
        Session {
            token: token.into(),
            role,
            user_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
