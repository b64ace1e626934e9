//! Session error model.

use thiserror::Error;

/// Result type used across the session and authorization layers.
pub type SessionResult<T> = Result<T, SessionError>;

/// Client-side session failure.
///
/// Keep this focused on the session lifecycle. Infrastructure details (storage
/// I/O, HTTP plumbing) belong to the crates that own them; they surface here
/// only as one of these kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No identity token was supplied or present in storage.
    #[error("no identity token present")]
    MissingToken,

    /// The token string is structurally invalid (shape, encoding, payload).
    #[error("malformed identity token: {0}")]
    MalformedToken(String),

    /// The token's expiry timestamp is in the past.
    #[error("identity token expired")]
    Expired,

    /// A call to the authentication server failed.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// Logout was invoked without a usable identity token (caller bug).
    #[error("logout invoked without a usable identity token")]
    InvalidLogoutCall,
}

impl SessionError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedToken(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkFailure(msg.into())
    }
}
