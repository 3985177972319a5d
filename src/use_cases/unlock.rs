//! Unlock manager
//!
//! Tracks the in-memory unlock key for the active OATH application and the
//! persisted key map keyed by application id. The in-memory key is a single
//! slot: one active device at a time, and a key is only ever trusted after
//! validating against the live application. Validation failures demote to
//! "locked", they never propagate.

use tracing::{debug, warn};

use crate::error::YkauthResult;
use crate::ports::{KeyStore, OathSession};

pub struct UnlockManager<S: KeyStore> {
    store: S,
    key: Option<Vec<u8>>,
}

impl<S: KeyStore> UnlockManager<S> {
    pub fn new(store: S) -> Self {
        Self { store, key: None }
    }

    /// Attempts to unlock the application behind `session`.
    ///
    /// An unlocked application succeeds trivially. Otherwise the in-memory
    /// key is tried first; if present and rejected, unlock fails without
    /// falling back to the persisted map. With no in-memory key, the
    /// persisted key for the application id is tried. Returns false when the
    /// caller must supply a password.
    pub fn unlock(&mut self, session: &mut impl OathSession) -> bool {
        if !session.locked() {
            return true;
        }
        if let Some(key) = self.key.clone() {
            return match session.validate(&key) {
                Ok(()) => true,
                Err(e) => {
                    debug!(error = %e, "in-memory key rejected by device");
                    false
                }
            };
        }
        let app_id = hex::encode(session.id());
        let Some(stored) = self.store.get(&app_id) else {
            return false;
        };
        let key = match hex::decode(&stored) {
            Ok(key) => key,
            Err(e) => {
                warn!(app_id, error = %e, "corrupt persisted key entry");
                return false;
            }
        };
        match session.validate(&key) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "persisted key rejected by device");
                false
            }
        }
    }

    /// Derives a key from `password` and validates it.
    ///
    /// On success the key becomes the in-memory key and, with `remember`,
    /// is persisted under the application id and flushed. Returns
    /// `Ok(false)` when the device rejects the derived key.
    pub fn provide_password(
        &mut self,
        session: &mut impl OathSession,
        password: &str,
        remember: bool,
    ) -> YkauthResult<bool> {
        let key = session.derive_key(password)?;
        if let Err(e) = session.validate(&key) {
            debug!(error = %e, "derived key rejected by device");
            return Ok(false);
        }
        if remember {
            let app_id = hex::encode(session.id());
            self.store.insert(app_id, hex::encode(&key));
            self.store.write()?;
        }
        self.key = Some(key);
        Ok(true)
    }

    /// Changes or clears the application password.
    ///
    /// Requires the application to be unlocked already. With a new password,
    /// the freshly derived key replaces the in-memory key and the persisted
    /// entry follows `remember`. With `None`, password protection and the
    /// persisted entry are removed and the in-memory key dropped. The store
    /// is flushed either way.
    pub fn set_password(
        &mut self,
        session: &mut impl OathSession,
        new_password: Option<&str>,
        remember: bool,
    ) -> YkauthResult<()> {
        let app_id = hex::encode(session.id());
        match new_password {
            Some(password) => {
                let key = session.set_password(password)?;
                if remember {
                    self.store.insert(app_id, hex::encode(&key));
                } else {
                    self.store.remove(&app_id);
                }
                self.key = Some(key);
            }
            None => {
                session.clear_password()?;
                self.store.remove(&app_id);
                self.key = None;
            }
        }
        self.store.write()?;
        Ok(())
    }

    /// Drops the in-memory key, leaving the persisted map intact.
    pub fn clear_key(&mut self) {
        self.key = None;
    }

    /// Whether the caller must supply a password before OATH operations.
    pub fn needs_validation(&mut self, session: &mut impl OathSession) -> bool {
        !self.unlock(session)
    }
}
