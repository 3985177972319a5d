use std::collections::HashMap;

use crate::error::StoreError;
use crate::ports::KeyStore;

/// Key store that never persists anything, for callers that decline
/// on-disk storage of derived keys.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    keys: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStore for MemoryStore {
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut store = MemoryStore::new();
        store.insert("abcd".to_string(), "0102".to_string());
        assert_eq!(store.get("abcd").as_deref(), Some("0102"));

        store.remove("abcd");
        assert_eq!(store.get("abcd"), None);
        assert!(store.write().is_ok());
    }
}
