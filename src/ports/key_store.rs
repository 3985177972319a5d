use crate::error::StoreError;

/// Persisted mapping of OATH application ids to derived unlock keys.
///
/// Both keys and values are hex strings. The store is loaded once at
/// construction and written back synchronously by the unlock manager after
/// every mutation; there is no batching or async flush.
pub trait KeyStore {
    fn get(&self, application_id: &str) -> Option<String>;

    fn insert(&mut self, application_id: String, key_hex: String);

    fn remove(&mut self, application_id: &str);

    /// Flush the current contents to the backing store.
    fn write(&mut self) -> Result<(), StoreError>;
}
