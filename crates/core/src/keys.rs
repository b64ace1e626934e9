//! Fixed storage keys and navigation anchors.
//!
//! These are process-wide, shared by both storage backends. Only the token
//! store is sanctioned to write under them; declaring them once here keeps the
//! dual-backend consistency invariant enforceable in one place.

/// Storage key holding the signed identity token.
pub const IDENTITY_TOKEN_KEY: &str = "identity-token";

/// Storage key holding the active tenant selection.
///
/// A tenant selection without a valid session is meaningless, so clearing the
/// session also clears this key.
pub const SELECTED_TENANT_KEY: &str = "selected-tenant";

/// Unauthenticated entry point. Logout (ordinary or forced) navigates here
/// unless the client is already there.
pub const LOGIN_PATH: &str = "/auth/login";
