//! Role claim normalization.

use serde::{Deserialize, Serialize};

/// Permission tier controlling which routes are visible/reachable.
///
/// Closed set: the server may introduce new role names before the client
/// recognizes them, so anything outside this set is dropped during resolution
/// rather than treated as an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Moderator,
    User,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::Admin, Role::Moderator, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::User => "user",
        }
    }

    /// Parse a single raw role segment. Whitespace and case are normalized;
    /// unrecognized names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "super_admin" => Some(Role::SuperAdmin),
            "admin" => Some(Role::Admin),
            "moderator" => Some(Role::Moderator),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a raw role claim into a canonical role set.
///
/// Splits on comma, trims and lowercases each segment, drops unknown names,
/// and deduplicates. Total and never empty: an absent claim or one with no
/// recognized segment resolves to the least-privilege `[Role::User]` baseline
/// rather than an empty authorization set.
pub fn resolve_roles(raw: Option<&str>) -> Vec<Role> {
    let mut roles = Vec::new();

    if let Some(raw) = raw {
        for segment in raw.split(',') {
            if let Some(role) = Role::parse(segment) {
                if !roles.contains(&role) {
                    roles.push(role);
                }
            }
        }
    }

    if roles.is_empty() {
        roles.push(Role::User);
    }

    roles
}
