use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::ports::KeyStore;

/// File-backed key store: one JSON object of hex strings per OATH namespace.
///
/// The file is read once at construction and rewritten in full on every
/// `write()`. Where the file lives is the caller's concern.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    keys: HashMap<String, String>,
}

impl SettingsStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let keys = match fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| StoreError::Load {
                    location: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(StoreError::Load {
                    location: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };
        Ok(Self { path, keys })
    }
}

impl KeyStore for SettingsStore {
    fn get(&self, application_id: &str) -> Option<String> {
        self.keys.get(application_id).cloned()
    }

    fn insert(&mut self, application_id: String, key_hex: String) {
        self.keys.insert(application_id, key_hex);
    }

    fn remove(&mut self, application_id: &str) {
        self.keys.remove(application_id);
    }

    fn write(&mut self) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(&self.keys).map_err(|e| StoreError::Write {
            location: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                    location: self.path.display().to_string(),
                    reason: e.to_string(),
                })?;
            }
        }
        fs::write(&self.path, contents).map_err(|e| StoreError::Write {
            location: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
