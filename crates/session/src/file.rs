//! File-backed durable storage.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;

use crate::store::{StorageBackend, StorageError};

/// Durable key-value store persisted as a JSON document under the OS data
/// directory. Survives client restarts; the durable counterpart to
/// [`crate::MemoryBackend`].
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    guard: Mutex<()>,
}

impl FileBackend {
    /// Open the backend at its default location,
    /// `{app_data_dir}/opsdeck/session.json`.
    pub fn open() -> Result<Self, StorageError> {
        let path = default_path().map_err(|err| StorageError::Unavailable(format!("{err:#}")))?;
        Ok(Self::with_path(path))
    }

    /// Open the backend at an explicit path (tests, alternate profiles).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    fn load(&self) -> anyhow::Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read storage file at {:?}", self.path))?;

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                // A corrupt file must not brick the client; start empty.
                tracing::warn!(path = ?self.path, "corrupt storage file, starting empty: {err}");
                Ok(HashMap::new())
            }
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create storage directory at {parent:?}"))?;
        }
        let raw = serde_json::to_string_pretty(entries).context("failed to serialize storage map")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write storage file at {:?}", self.path))?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = lock(&self.guard)?;
        let entries = self
            .load()
            .map_err(|err| StorageError::Unavailable(format!("{err:#}")))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = lock(&self.guard)?;
        let mut entries = self
            .load()
            .map_err(|err| StorageError::Unavailable(format!("{err:#}")))?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
            .map_err(|err| StorageError::Unavailable(format!("{err:#}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = lock(&self.guard)?;
        let mut entries = self
            .load()
            .map_err(|err| StorageError::Unavailable(format!("{err:#}")))?;
        if entries.remove(key).is_some() {
            self.save(&entries)
                .map_err(|err| StorageError::Unavailable(format!("{err:#}")))?;
        }
        Ok(())
    }
}

fn lock(guard: &Mutex<()>) -> Result<std::sync::MutexGuard<'_, ()>, StorageError> {
    guard
        .lock()
        .map_err(|_| StorageError::Unavailable("storage lock poisoned".into()))
}

/// Resolve the default storage file path under the OS app data directory.
fn default_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut home| {
                home.push(".local");
                home.push("share");
                home
            })
        })
        .context("failed to resolve OS app data directory")?;

    Ok(base.join("opsdeck").join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn scratch_backend() -> FileBackend {
        let path = std::env::temp_dir().join(format!(
            "opsdeck-file-backend-{}-{}.json",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = fs::remove_file(&path);
        FileBackend::with_path(path)
    }

    #[test]
    fn set_get_remove_round_trip() {
        let backend = scratch_backend();
        assert!(backend.get("k").unwrap().is_none());

        backend.set("k", "v").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));

        backend.remove("k").unwrap();
        assert!(backend.get("k").unwrap().is_none());

        let _ = fs::remove_file(&backend.path);
    }

    #[test]
    fn values_survive_reopening_the_file() {
        let backend = scratch_backend();
        backend.set("k", "v").unwrap();

        let reopened = FileBackend::with_path(backend.path.clone());
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));

        let _ = fs::remove_file(&backend.path);
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let backend = scratch_backend();
        fs::create_dir_all(backend.path.parent().unwrap()).unwrap();
        fs::write(&backend.path, "not json at all").unwrap();

        assert!(backend.get("k").unwrap().is_none());

        let _ = fs::remove_file(&backend.path);
    }
}
