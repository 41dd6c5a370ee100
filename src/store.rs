// Whole-document JSON persistence for the three config catalogs.
//
// Each catalog (roles, formations, clubs) is one independently-addressable
// file, read and rewritten as a whole. There is no cross-document
// transaction and no write serialization: last writer wins.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write document {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize document {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One JSON document on disk.
///
/// Loading never fails: a missing or malformed file parses as the caller's
/// default (with a warning), so a corrupt catalog degrades the service
/// instead of taking it down. Saving rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
}

impl JsonDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonDocument { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document, falling back to `T::default()` when the
    /// file is missing or unparseable.
    pub fn load<T: DeserializeOwned + Default>(&self) -> T {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "document missing, using defaults");
                return T::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "document unreadable, using defaults");
                return T::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "document malformed, using defaults");
                T::default()
            }
        }
    }

    /// Whether the file exists on disk at all (used to decide whether a
    /// built-in seed should be written out).
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Overwrite the document. Parent directories are created as needed.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }
        let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialize {
            path: self.path.clone(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}
