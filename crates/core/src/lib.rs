//! `opsdeck-core` — client foundation building blocks.
//!
//! This crate contains **pure** primitives shared by the session and
//! authorization layers (no I/O, no async).

pub mod error;
pub mod keys;

pub use error::{SessionError, SessionResult};
pub use keys::{IDENTITY_TOKEN_KEY, LOGIN_PATH, SELECTED_TENANT_KEY};
