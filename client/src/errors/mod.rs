//! Global client error types.
//!
//! This module defines the error taxonomy shared by the session client, the
//! asset loader, and the typed API layer, providing one consistent failure
//! surface for every network interaction.

use thiserror::Error;

/// Errors produced by client-side API and asset operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The session could not be recovered during checkout; the caller keeps
    /// its form state and decides how to re-authenticate.
    #[error("Session expired: {message}")]
    SessionExpired { message: String },

    /// Non-2xx response that is not an authorization failure. The display
    /// output is the server-provided message so callers can surface it
    /// verbatim.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// A 2xx response declared JSON but the body did not parse, or a parsed
    /// body did not match the expected shape.
    #[error("Invalid response body: {message}")]
    InvalidBody { message: String },

    /// A request payload failed local validation before being sent.
    #[error("Validation error: {message}")]
    Validation { message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    // Helper constructors for common patterns

    pub fn session_expired(message: impl Into<String>) -> Self {
        Self::SessionExpired {
            message: message.into(),
        }
    }

    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status attached to the error, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Network { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
