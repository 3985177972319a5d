//! Controller facade
//!
//! One entry point per public operation, combining the device session
//! controller, the unlock manager and the QR scanner. This is the surface a
//! process-boundary adapter wraps; everything it accepts and returns is
//! representable in a text interchange format via [`crate::adapters::json`].
//!
//! Query operations degrade silently when no device is active or reachable;
//! mutating operations fail loudly so a half-applied change is never
//! swallowed.

use crate::error::{DiscoveryError, YkauthResult};
use crate::model::{Code, Credential, CredentialData, DeviceSnapshot, OtpSlot};
use crate::ports::{DeviceDiscovery, DeviceHandle, KeyStore, OathSession, QrScanner};
use crate::use_cases::{
    credentials, parse_qr, slots, AddCredentialRequest, DeviceSessionController, UnlockManager,
};

pub struct Controller<D: DeviceDiscovery, S: KeyStore, Q: QrScanner> {
    session: DeviceSessionController<D>,
    unlock: UnlockManager<S>,
    scanner: Q,
}

impl<D: DeviceDiscovery, S: KeyStore, Q: QrScanner> Controller<D, S, Q> {
    pub fn new(discovery: D, store: S, scanner: Q) -> Self {
        Self {
            session: DeviceSessionController::new(discovery),
            unlock: UnlockManager::new(store),
            scanner,
        }
    }

    pub fn count_devices(&self, otp_mode: bool) -> usize {
        self.session.count_devices(otp_mode)
    }

    pub fn refresh(&mut self, otp_mode: bool) -> Option<DeviceSnapshot> {
        self.session.refresh(otp_mode)
    }

    /// Drops the in-memory unlock key, e.g. on logout. Persisted keys stay.
    pub fn clear_key(&mut self) {
        self.unlock.clear_key();
    }

    pub fn refresh_credentials(&mut self, timestamp: u64) -> Vec<(Credential, Option<Code>)> {
        let Some(handle) = self.session.active_handle() else {
            return Vec::new();
        };
        credentials::list_with_codes(handle, &mut self.unlock, timestamp)
    }

    pub fn calculate(&mut self, credential: &Credential, timestamp: u64) -> Option<Code> {
        let handle = self.session.active_handle()?;
        credentials::calculate(handle, &mut self.unlock, credential, timestamp)
    }

    pub fn calculate_slot_mode(
        &self,
        slot: OtpSlot,
        digits: u8,
        timestamp: u64,
    ) -> Option<(Credential, Code)> {
        let handle = self.session.active_handle()?;
        slots::calculate_touch(handle, slot, digits, timestamp)
    }

    pub fn refresh_slot_credentials(
        &self,
        enabled: [bool; 2],
        digits: [u8; 2],
        timestamp: u64,
    ) -> Vec<(Credential, Option<Code>)> {
        let Some(handle) = self.session.active_handle() else {
            return Vec::new();
        };
        slots::refresh_both(handle, enabled, digits, timestamp)
    }

    /// Whether the caller must supply a password before OATH operations.
    pub fn needs_validation(&mut self) -> bool {
        let Some(handle) = self.session.active_handle() else {
            return true;
        };
        match handle.open_oath() {
            Ok(mut session) => self.unlock.needs_validation(&mut session),
            Err(_) => true,
        }
    }

    /// Id of the active device's OATH application instance.
    pub fn get_oath_id(&self) -> Option<Vec<u8>> {
        let handle = self.session.active_handle()?;
        let session = handle.open_oath().ok()?;
        Some(session.id().to_vec())
    }

    pub fn provide_password(&mut self, password: &str, remember: bool) -> YkauthResult<bool> {
        let handle = self
            .session
            .active_handle()
            .ok_or(DiscoveryError::NoActiveDevice)?;
        let mut session = handle.open_oath()?;
        self.unlock.provide_password(&mut session, password, remember)
    }

    pub fn set_password(
        &mut self,
        new_password: Option<&str>,
        remember: bool,
    ) -> YkauthResult<()> {
        let handle = self
            .session
            .active_handle()
            .ok_or(DiscoveryError::NoActiveDevice)?;
        let mut session = handle.open_oath()?;
        self.unlock.unlock(&mut session);
        self.unlock.set_password(&mut session, new_password, remember)
    }

    pub fn add_credential(&mut self, request: &AddCredentialRequest) -> YkauthResult<Option<String>> {
        let handle = self
            .session
            .active_handle()
            .ok_or(DiscoveryError::NoActiveDevice)?;
        credentials::add(handle, &mut self.unlock, request)
    }

    pub fn delete_credential(&mut self, credential: &Credential) -> YkauthResult<()> {
        let handle = self
            .session
            .active_handle()
            .ok_or(DiscoveryError::NoActiveDevice)?;
        credentials::delete(handle, &mut self.unlock, credential)
    }

    pub fn add_slot_credential(
        &self,
        slot: OtpSlot,
        key_base32: &str,
        touch_required: bool,
    ) -> YkauthResult<Option<String>> {
        let handle = self
            .session
            .active_handle()
            .ok_or(DiscoveryError::NoActiveDevice)?;
        slots::add(handle, slot, key_base32, touch_required)
    }

    pub fn delete_slot_credential(&self, slot: OtpSlot) -> YkauthResult<()> {
        let handle = self
            .session
            .active_handle()
            .ok_or(DiscoveryError::NoActiveDevice)?;
        slots::delete(handle, slot)
    }

    pub fn slot_status(&self) -> YkauthResult<[bool; 2]> {
        let handle = self
            .session
            .active_handle()
            .ok_or(DiscoveryError::NoActiveDevice)?;
        slots::status(handle)
    }

    pub fn parse_qr(&self, data: Vec<u8>, width: usize, height: usize) -> Option<CredentialData> {
        parse_qr::parse(&self.scanner, data, width, height)
    }

    pub fn reset(&mut self) -> YkauthResult<()> {
        let handle = self
            .session
            .active_handle()
            .ok_or(DiscoveryError::NoActiveDevice)?;
        credentials::reset(handle)
    }
}
