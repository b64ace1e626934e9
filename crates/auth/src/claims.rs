//! Identity token claims model (transport-agnostic).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;
use crate::roles::resolve_roles;

/// Decoded payload of the identity token.
///
/// Only `id` and `exp` are required on the wire; every other claim is treated
/// as absent rather than erroring when missing, and unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject / account identifier.
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Raw role claim, possibly a comma-delimited list. Normalized via
    /// [`Claims::resolved_roles`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<String>,

    /// Expiration timestamp (unix seconds).
    pub exp: i64,

    /// Issued-at timestamp (unix seconds).
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// Expiry check against the supplied wall-clock instant.
    ///
    /// Strict less-than: a token expiring at exactly `now` is still valid for
    /// that second. Callers must re-check on every query; a `Claims` value is
    /// never trusted across time.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp < now.timestamp()
    }

    /// Canonical role set derived from the raw role claim.
    ///
    /// Total: a subject with no recognized role still resolves to
    /// `[Role::User]`.
    pub fn resolved_roles(&self) -> Vec<Role> {
        resolve_roles(self.roles.as_deref())
    }
}
