//! Dual-backend token persistence.
//!
//! All reads and writes of the fixed storage keys go through [`TokenStore`];
//! no other component touches the backends directly, which keeps the
//! dual-backend consistency invariant enforceable in one place.

use std::sync::Arc;

use thiserror::Error;

use opsdeck_core::{IDENTITY_TOKEN_KEY, SELECTED_TENANT_KEY};

/// Failure inside a single storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot serve requests (quota, disabled storage, poisoned
    /// lock).
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A local key-value store.
///
/// Two instances back the token store: one durable across client restarts,
/// one scoped to the current session. The store treats both uniformly.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Redundant token persistence across a durable and a session-scoped backend.
///
/// Writes are best-effort on both sides, not transactional: an unavailable
/// backend is logged and skipped while the other still succeeds. Reads prefer
/// the durable side, so both "remember me" and ephemeral-session use work
/// without a separate flag. There is no cross-backend locking; callers
/// serialize login/logout attempts.
#[derive(Clone)]
pub struct TokenStore {
    durable: Arc<dyn StorageBackend>,
    scoped: Arc<dyn StorageBackend>,
}

impl TokenStore {
    pub fn new(durable: Arc<dyn StorageBackend>, scoped: Arc<dyn StorageBackend>) -> Self {
        Self { durable, scoped }
    }

    /// Persist `token` under the identity key in both backends.
    pub fn write(&self, token: &str) {
        for (name, backend) in self.backends() {
            if let Err(err) = backend.set(IDENTITY_TOKEN_KEY, token) {
                tracing::warn!(backend = name, "failed to persist identity token: {err}");
            }
        }
    }

    /// Read the stored token, durable backend first.
    ///
    /// Values may arrive wrapped (a JSON-stringified object carrying a
    /// `token`/`jwt` field, or a quote-wrapped string); they are unwrapped
    /// transparently so the codec always receives a raw compact token.
    pub fn read(&self) -> Option<String> {
        for (name, backend) in self.backends() {
            match backend.get(IDENTITY_TOKEN_KEY) {
                Ok(Some(value)) => return Some(unwrap_token_value(&value)),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(backend = name, "failed to read identity token: {err}");
                }
            }
        }
        None
    }

    /// Remove the identity token and the active tenant selection from both
    /// backends unconditionally.
    ///
    /// The tenant selection goes too because a tenant choice without a valid
    /// session is meaningless.
    pub fn clear(&self) {
        for (name, backend) in self.backends() {
            for key in [IDENTITY_TOKEN_KEY, SELECTED_TENANT_KEY] {
                if let Err(err) = backend.remove(key) {
                    tracing::warn!(backend = name, key, "failed to clear storage key: {err}");
                }
            }
        }
    }

    fn backends(&self) -> [(&'static str, &Arc<dyn StorageBackend>); 2] {
        [("durable", &self.durable), ("session", &self.scoped)]
    }
}

/// Unwrap a possibly JSON-wrapped stored value into a raw token string.
///
/// A bare compact token is not valid JSON and passes through untouched.
fn unwrap_token_value(value: &str) -> String {
    let trimmed = value.trim();

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match json {
            serde_json::Value::String(inner) => return inner,
            serde_json::Value::Object(map) => {
                for field in ["token", "jwt"] {
                    if let Some(serde_json::Value::String(inner)) = map.get(field) {
                        return inner.clone();
                    }
                }
            }
            _ => {}
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;

    struct BrokenBackend;

    impl StorageBackend for BrokenBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
    }

    fn store_with_backends() -> (Arc<MemoryBackend>, Arc<MemoryBackend>, TokenStore) {
        let durable = Arc::new(MemoryBackend::new());
        let scoped = Arc::new(MemoryBackend::new());
        let store = TokenStore::new(durable.clone(), scoped.clone());
        (durable, scoped, store)
    }

    #[test]
    fn write_then_read_round_trips() {
        let (_, _, store) = store_with_backends();
        store.write("a.b.c");
        assert_eq!(store.read().as_deref(), Some("a.b.c"));
    }

    #[test]
    fn write_lands_in_both_backends() {
        let (durable, scoped, store) = store_with_backends();
        store.write("a.b.c");
        assert_eq!(durable.get(IDENTITY_TOKEN_KEY).unwrap().as_deref(), Some("a.b.c"));
        assert_eq!(scoped.get(IDENTITY_TOKEN_KEY).unwrap().as_deref(), Some("a.b.c"));
    }

    #[test]
    fn read_prefers_durable_backend() {
        let (durable, scoped, store) = store_with_backends();
        durable.set(IDENTITY_TOKEN_KEY, "durable.t.v").unwrap();
        scoped.set(IDENTITY_TOKEN_KEY, "scoped.t.v").unwrap();
        assert_eq!(store.read().as_deref(), Some("durable.t.v"));
    }

    #[test]
    fn read_falls_back_to_session_backend() {
        let (_, scoped, store) = store_with_backends();
        scoped.set(IDENTITY_TOKEN_KEY, "scoped.t.v").unwrap();
        assert_eq!(store.read().as_deref(), Some("scoped.t.v"));
    }

    #[test]
    fn one_broken_backend_does_not_stop_the_other() {
        let scoped = Arc::new(MemoryBackend::new());
        let store = TokenStore::new(Arc::new(BrokenBackend), scoped.clone());

        store.write("a.b.c");
        assert_eq!(scoped.get(IDENTITY_TOKEN_KEY).unwrap().as_deref(), Some("a.b.c"));
        assert_eq!(store.read().as_deref(), Some("a.b.c"));
    }

    #[test]
    fn clear_removes_token_and_tenant_from_both_backends() {
        let (durable, scoped, store) = store_with_backends();
        store.write("a.b.c");
        durable.set(SELECTED_TENANT_KEY, "acme").unwrap();
        scoped.set(SELECTED_TENANT_KEY, "acme").unwrap();

        store.clear();

        for backend in [&durable, &scoped] {
            assert!(backend.get(IDENTITY_TOKEN_KEY).unwrap().is_none());
            assert!(backend.get(SELECTED_TENANT_KEY).unwrap().is_none());
        }
    }

    #[test]
    fn read_unwraps_json_object_wrappers() {
        let (durable, _, store) = store_with_backends();

        durable.set(IDENTITY_TOKEN_KEY, r#"{"token":"a.b.c"}"#).unwrap();
        assert_eq!(store.read().as_deref(), Some("a.b.c"));

        durable.set(IDENTITY_TOKEN_KEY, r#"{"jwt":"x.y.z"}"#).unwrap();
        assert_eq!(store.read().as_deref(), Some("x.y.z"));
    }

    #[test]
    fn read_unwraps_quote_wrapped_strings() {
        let (durable, _, store) = store_with_backends();
        durable.set(IDENTITY_TOKEN_KEY, "\"a.b.c\"").unwrap();
        assert_eq!(store.read().as_deref(), Some("a.b.c"));
    }

    #[test]
    fn read_passes_bare_tokens_through() {
        assert_eq!(unwrap_token_value("a.b.c"), "a.b.c");
        assert_eq!(unwrap_token_value("  a.b.c  "), "a.b.c");
    }
}
