//! `opsdeck-session` — client-resident session lifecycle.
//!
//! This crate owns the signed identity token across two redundant local
//! stores, the login/logout side effects against the authentication server,
//! and the role-derived navigation computed from the current session.
//!
//! The session itself is never persisted: it is recomputed from storage plus
//! the token codec on every query, so storage stays the single source of truth
//! and expiry is always evaluated against the current wall clock.

pub mod api;
pub mod file;
pub mod manager;
pub mod memory;
pub mod navigation;
pub mod store;

pub use api::{ApiError, AuthApi, HttpAuthApi, RegisterRequest};
pub use file::FileBackend;
pub use manager::{Credentials, LogoutOutcome, Navigator, Session, SessionManager, SessionState};
pub use memory::MemoryBackend;
pub use navigation::{reachable_paths, visible_routes};
pub use store::{StorageBackend, StorageError, TokenStore};
