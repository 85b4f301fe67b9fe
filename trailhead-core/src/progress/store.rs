//! Durable key-value stores for the progress snapshot.
//!
//! The store is an opaque string-valued facility holding the whole snapshot
//! under one fixed key owned by the implementation. Read and write failures
//! are surfaced as explicit errors; the load boundary in
//! [`super::load`](crate::progress::load) degrades them to "no saved
//! progress" so a broken store never blocks use of the catalogue.

use std::path::{Path, PathBuf};

/// Errors from reading or writing the durable progress store.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("progress store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("saved progress is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Opaque durable key-value store for the serialized progress snapshot.
pub trait ProgressStore: Send {
    /// Reads the stored snapshot string, or `None` when nothing was saved.
    ///
    /// # Errors
    /// - `PersistenceError::Unavailable` - The store cannot be reached
    /// - `PersistenceError::Io` - The underlying read failed
    fn read(&self) -> Result<Option<String>, PersistenceError>;

    /// Writes the snapshot string, replacing any previous value.
    ///
    /// # Errors
    /// - `PersistenceError::Unavailable` - The store cannot be reached
    /// - `PersistenceError::Io` - The underlying write failed
    fn write(&mut self, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory store for tests and development.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    value: Option<String>,
    fail_writes: bool,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose writes always fail, for exercising the
    /// fails-soft persistence paths.
    pub fn new_with_write_failure() -> Self {
        Self {
            value: None,
            fail_writes: true,
        }
    }

    /// Creates a store pre-seeded with a raw snapshot string.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            fail_writes: false,
        }
    }

    /// The raw stored string, for assertions.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Unavailable {
                reason: "simulated write failure".to_string(),
            });
        }
        self.value = Some(value.to_string());
        Ok(())
    }
}

/// File-backed store keeping the snapshot in a single JSON file.
///
/// An absent file reads as "nothing saved". Writes go through a temp file
/// in the same directory followed by a rename, so a crash mid-write never
/// leaves a truncated snapshot behind.
#[derive(Debug)]
pub struct JsonFileProgressStore {
    path: PathBuf,
}

impl JsonFileProgressStore {
    /// Store the snapshot at `dir/<storage_key>.json`.
    pub fn new(dir: impl AsRef<Path>, storage_key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{storage_key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileProgressStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, value: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
