//! Session lifecycle: login, logout, and the current-session query.

use std::sync::Arc;

use chrono::Utc;

use opsdeck_auth::{Claims, codec};
use opsdeck_core::{LOGIN_PATH, SessionError, SessionResult};

use crate::api::AuthApi;
use crate::store::TokenStore;

/// Where the session manager sits in its lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggingIn,
    LoggedIn,
    LoggingOut,
}

/// Login credentials as entered in the UI.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The derived fact of "currently authenticated as X".
///
/// Never persisted and never cached across time: always recomputed from the
/// token store plus the codec, so storage stays the single source of truth and
/// expiry is re-evaluated on every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub claims: Claims,
}

/// Navigation seam for the forced-redirect contract on logout.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;

    /// Perform a full navigation to `path`.
    fn navigate(&self, path: &str);
}

/// How a completed logout went.
///
/// Local cleanup and redirect have already happened in every case; this only
/// reports the server notification, which never blocks completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The server acknowledged the logout.
    Acknowledged,
    /// The server notification failed. Already logged; safe to ignore.
    NotifyFailed(String),
}

/// Owns login/logout side effects and answers "is there a valid, non-expired
/// identity right now".
///
/// Login and logout take `&mut self`: the UI disables the triggering control
/// while a call is in flight, so attempts are serialized by construction. The
/// session query takes `&self`, has no suspension point, and is safe to call
/// from render-path code.
pub struct SessionManager {
    store: TokenStore,
    api: Arc<dyn AuthApi>,
    navigator: Arc<dyn Navigator>,
    state: SessionState,
}

impl SessionManager {
    pub fn new(store: TokenStore, api: Arc<dyn AuthApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            api,
            navigator,
            state: SessionState::LoggedOut,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The sanctioned mutator for the session storage keys.
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Exchange credentials for a token and persist it in both backends.
    ///
    /// On failure the store is cleared (no partial state) and the error is
    /// propagated to the caller with the server's human-readable message.
    pub async fn login(&mut self, credentials: &Credentials) -> SessionResult<()> {
        self.state = SessionState::LoggingIn;

        match self
            .api
            .login(&credentials.email, &credentials.password)
            .await
        {
            Ok(token) => {
                self.store.write(&token);
                self.state = SessionState::LoggedIn;
                Ok(())
            }
            Err(err) => {
                self.store.clear();
                self.state = SessionState::LoggedOut;
                Err(SessionError::network(err.message()))
            }
        }
    }

    /// Clear the session locally, notify the server best-effort, then redirect
    /// to the unauthenticated entry point.
    ///
    /// Cleanup runs first so the client is unauthenticated even when the
    /// notification fails; a network failure is logged and reported as
    /// [`LogoutOutcome::NotifyFailed`] without blocking completion. Calling
    /// this without a usable token still performs the full cleanup and
    /// redirect but returns [`SessionError::InvalidLogoutCall`] — logout must
    /// never be reachable with a blank identity in correct usage.
    pub async fn logout(&mut self) -> SessionResult<LogoutOutcome> {
        self.state = SessionState::LoggingOut;

        let token = self.store.read();
        self.store.clear();

        let result = match token.as_deref().map(str::trim) {
            None | Some("") => Err(SessionError::InvalidLogoutCall),
            Some(token) => match self.api.logout(token).await {
                Ok(()) => Ok(LogoutOutcome::Acknowledged),
                Err(err) => {
                    tracing::warn!("logout notification failed: {err}");
                    Ok(LogoutOutcome::NotifyFailed(err.message()))
                }
            },
        };

        self.redirect_to_entry();
        self.state = SessionState::LoggedOut;
        result
    }

    /// Read-only query for the current identity.
    ///
    /// Idempotent and re-evaluated on every call — expiry is time-dependent,
    /// so the result is never cached. An absent or structurally invalid stored
    /// value yields `None` without touching storage; a token that fails to
    /// decode or has expired clears storage and yields `None` (self-healing,
    /// not an error: an expired session is an expected steady state).
    pub fn current_session(&self) -> Option<Session> {
        let token = self.store.read()?;

        if !codec::has_token_shape(token.trim()) {
            // Whatever is stored is not a token; reading stays side-effect-free.
            return None;
        }

        let claims = match codec::decode(Some(&token)) {
            Ok(claims) => claims,
            Err(err) => {
                tracing::debug!("stored identity token failed to decode, clearing session: {err}");
                self.store.clear();
                return None;
            }
        };

        if claims.is_expired(Utc::now()) {
            tracing::debug!("stored identity token expired, clearing session");
            self.store.clear();
            return None;
        }

        Some(Session { token, claims })
    }

    pub fn is_valid(&self) -> bool {
        self.current_session().is_some()
    }

    fn redirect_to_entry(&self) {
        if self.navigator.current_path() != LOGIN_PATH {
            self.navigator.navigate(LOGIN_PATH);
        }
    }
}
