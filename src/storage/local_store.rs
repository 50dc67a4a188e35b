use crate::{
    error::{ConsoleError, Result},
    validation,
};
use serde::{Serialize, de::DeserializeOwned};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where a store's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// The load attempt has not finished; the default is showing.
    Pending,
    /// A previously stored value replaced the default.
    Hydrated,
    /// Nothing usable was stored; the default is kept.
    Defaulted,
}

impl Hydration {
    pub fn is_complete(&self) -> bool {
        !matches!(self, Hydration::Pending)
    }
}

/// A typed value mirrored to `<dir>/<key>.json`.
pub struct LocalStore<T> {
    key: String,
    file_path: PathBuf,
    value: T,
    hydration: Hydration,
}

impl<T> LocalStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(dir: &Path, key: &str, default: T) -> Result<Self> {
        validation::validate_key(key)?;
        Ok(Self {
            key: key.to_string(),
            file_path: dir.join(format!("{}.json", key)),
            value: default,
            hydration: Hydration::Pending,
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Current value and whether the load attempt has completed.
    pub fn get(&self) -> (&T, bool) {
        (&self.value, self.hydration.is_complete())
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    /// Load the stored value, keeping the default when there is none or it is unreadable.
    pub async fn hydrate(&mut self) {
        match tokio::fs::read_to_string(&self.file_path).await {
            Ok(content) => match serde_json::from_str::<T>(&content) {
                Ok(value) => {
                    tracing::debug!(key = %self.key, "Hydrated store");
                    self.value = value;
                    self.hydration = Hydration::Hydrated;
                }
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "Ignoring corrupt store value");
                    self.hydration = Hydration::Defaulted;
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(key = %self.key, "No stored value, using default");
                self.hydration = Hydration::Defaulted;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read store value");
                self.hydration = Hydration::Defaulted;
            }
        }
    }

    /// Replace the value in memory and persist it.
    ///
    /// Persistence failures are logged, never returned; the in-memory value stays `value`.
    pub fn set(&mut self, value: T) {
        self.value = value;
        if let Err(e) = self.persist() {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist store value");
        }
    }

    /// Apply `f` to the current value and persist the result.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        let mut next = self.value.clone();
        f(&mut next);
        self.set(next);
    }

    fn persist(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.value)?;
        atomic_write(&self.file_path, &content)
    }
}

/// Write via a temp file in the target directory, then rename over the target.
fn atomic_write(target_path: &Path, content: &str) -> Result<()> {
    let target_dir = target_path
        .parent()
        .ok_or_else(|| ConsoleError::Storage("Target path has no parent directory".to_string()))?;
    std::fs::create_dir_all(target_dir)?;

    let mut temp_file = NamedTempFile::new_in(target_dir)
        .map_err(|e| ConsoleError::Storage(format!("Failed to create temp file: {}", e)))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| ConsoleError::Storage(format!("Failed to write to temp file: {}", e)))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| ConsoleError::Storage(format!("Failed to sync temp file: {}", e)))?;
    temp_file
        .persist(target_path)
        .map_err(|e| ConsoleError::Storage(format!("Failed to persist temp file: {}", e)))?;

    Ok(())
}
