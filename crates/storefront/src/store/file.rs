//! File-backed store: one JSON document per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{Store, StoreError};

/// Keyed JSON persistence over plain files.
///
/// Each key maps to `<dir>/<key>.json`; the directory is created on the
/// first write. Writes go through a sibling temp file and a rename, so a
/// crash mid-write leaves the previous document intact.
///
/// Two instances pointing at the same directory behave like two browser
/// tabs: last writer wins, and there is no change notification.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. No I/O happens until first use.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory documents are stored under.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        if valid_key(key) {
            Some(self.dir.join(format!("{key}.json")))
        } else {
            tracing::warn!(key, "rejecting key unusable as a file name");
            None
        }
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}

impl Store for FileStore {
    fn read(&self, key: &str) -> Option<Value> {
        let path = self.path_for(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored document");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored document is not valid JSON");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.path_for(key).ok_or_else(|| StoreError::Substrate {
            key: key.to_owned(),
            message: "key is not usable as a file name".to_owned(),
        })?;

        let substrate_err = |e: std::io::Error| {
            tracing::warn!(key, error = %e, "failed to write stored document");
            StoreError::Substrate {
                key: key.to_owned(),
                message: e.to_string(),
            }
        };

        fs::create_dir_all(&self.dir).map_err(substrate_err)?;

        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value.to_string()).map_err(substrate_err)?;
        fs::rename(&tmp, &path).map_err(substrate_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key).ok_or_else(|| StoreError::Substrate {
            key: key.to_owned(),
            message: "key is not usable as a file name".to_owned(),
        })?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to remove stored document");
                Err(StoreError::Substrate {
                    key: key.to_owned(),
                    message: e.to_string(),
                })
            }
        }
    }
}
