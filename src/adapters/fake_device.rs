//! Fake device adapter for testing the orchestration layer
//!
//! Implements the discovery, OATH and OTP ports over plain in-memory state.
//! Shared `Rc<RefCell<..>>` state lets tests mutate the device between
//! operations and observe session-open call counts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{DiscoveryError, OathEngineError, OtpEngineError, QrError};
use crate::model::{
    Code, Credential, CredentialData, OathType, OtpSlot, Transport, TransportMode, Version,
    DEFAULT_PERIOD,
};
use crate::ports::{DeviceDiscovery, DeviceHandle, OathSession, OtpSession, PixelImage, QrScanner};

/// Deterministic stand-in for the engine's password key derivation.
pub fn fake_derived_key(password: &str) -> Vec<u8> {
    format!("derived:{password}").into_bytes()
}

#[derive(Debug, Clone)]
pub struct FakeOathState {
    pub id: Vec<u8>,
    pub version: Version,
    /// Key protecting the application; `None` means unprotected.
    pub password_key: Option<Vec<u8>>,
    pub credentials: Vec<CredentialData>,
    /// Error the next `put` should fail with.
    pub put_error: Option<OathEngineError>,
    pub reset_count: usize,
}

impl Default for FakeOathState {
    fn default() -> Self {
        Self {
            id: b"fake-oath-app".to_vec(),
            version: Version(5, 2, 4),
            password_key: None,
            credentials: Vec::new(),
            put_error: None,
            reset_count: 0,
        }
    }
}

impl FakeOathState {
    fn credential_key(data: &CredentialData) -> Vec<u8> {
        let mut key = String::new();
        if data.oath_type == OathType::Totp && data.period != DEFAULT_PERIOD {
            key.push_str(&format!("{}/", data.period));
        }
        if let Some(issuer) = &data.issuer {
            key.push_str(issuer);
            key.push(':');
        }
        key.push_str(&data.name);
        key.into_bytes()
    }
}

pub struct FakeOathSession {
    state: Rc<RefCell<FakeOathState>>,
    id: Vec<u8>,
    validated: bool,
}

impl FakeOathSession {
    fn new(state: Rc<RefCell<FakeOathState>>) -> Self {
        let id = state.borrow().id.clone();
        Self {
            state,
            id,
            validated: false,
        }
    }

    fn code_for(data: &CredentialData, timestamp: u64) -> Option<Code> {
        if data.touch || data.oath_type == OathType::Hotp {
            return None;
        }
        let period = u64::from(data.period.max(1));
        let valid_from = timestamp - (timestamp % period);
        Some(Code::new(
            format!("{:06}", timestamp % 1_000_000),
            valid_from,
            valid_from + period,
        ))
    }
}

impl OathSession for FakeOathSession {
    fn locked(&self) -> bool {
        self.state.borrow().password_key.is_some() && !self.validated
    }

    fn id(&self) -> &[u8] {
        &self.id
    }

    fn version(&self) -> Version {
        self.state.borrow().version
    }

    fn validate(&mut self, key: &[u8]) -> Result<(), OathEngineError> {
        match &self.state.borrow().password_key {
            Some(expected) if expected == key => {
                self.validated = true;
                Ok(())
            }
            Some(_) => Err(OathEngineError::ValidationFailed),
            None => Ok(()),
        }
    }

    fn derive_key(&self, password: &str) -> Result<Vec<u8>, OathEngineError> {
        Ok(fake_derived_key(password))
    }

    fn set_password(&mut self, password: &str) -> Result<Vec<u8>, OathEngineError> {
        let key = fake_derived_key(password);
        self.state.borrow_mut().password_key = Some(key.clone());
        self.validated = true;
        Ok(key)
    }

    fn clear_password(&mut self) -> Result<(), OathEngineError> {
        self.state.borrow_mut().password_key = None;
        Ok(())
    }

    fn calculate_all(
        &mut self,
        timestamp: u64,
    ) -> Result<Vec<(Credential, Option<Code>)>, OathEngineError> {
        if self.locked() {
            return Err(OathEngineError::Failed {
                reason: "application is locked".to_string(),
            });
        }
        Ok(self
            .state
            .borrow()
            .credentials
            .iter()
            .map(|data| {
                let cred = Credential::new(
                    FakeOathState::credential_key(data),
                    data.oath_type,
                    data.touch,
                );
                let code = Self::code_for(data, timestamp);
                (cred, code)
            })
            .collect())
    }

    fn calculate(
        &mut self,
        credential: &Credential,
        timestamp: u64,
    ) -> Result<Code, OathEngineError> {
        if self.locked() {
            return Err(OathEngineError::Failed {
                reason: "application is locked".to_string(),
            });
        }
        let state = self.state.borrow();
        let data = state
            .credentials
            .iter()
            .find(|data| FakeOathState::credential_key(data) == credential.key)
            .ok_or_else(|| OathEngineError::Failed {
                reason: "no such credential".to_string(),
            })?;
        let period = u64::from(data.period.max(1));
        let valid_from = timestamp - (timestamp % period);
        Ok(Code::new(
            format!("{:06}", timestamp % 1_000_000),
            valid_from,
            valid_from + period,
        ))
    }

    fn put(&mut self, data: &CredentialData) -> Result<(), OathEngineError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.put_error.clone() {
            return Err(error);
        }
        state.credentials.push(data.clone());
        Ok(())
    }

    fn delete(&mut self, credential: &Credential) -> Result<(), OathEngineError> {
        let mut state = self.state.borrow_mut();
        let before = state.credentials.len();
        state
            .credentials
            .retain(|data| FakeOathState::credential_key(data) != credential.key);
        if state.credentials.len() == before {
            return Err(OathEngineError::Failed {
                reason: "no such credential".to_string(),
            });
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<(), OathEngineError> {
        let mut state = self.state.borrow_mut();
        state.credentials.clear();
        state.password_key = None;
        state.reset_count += 1;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FakeSlotConfig {
    pub key: Vec<u8>,
    pub touch_required: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeOtpState {
    pub slots: [Option<FakeSlotConfig>; 2],
    /// Whether the simulated user touches the device when asked to.
    pub user_touches: bool,
    /// Error the next `program_challenge_response` should fail with.
    pub program_error: Option<OtpEngineError>,
}

pub struct FakeOtpSession {
    state: Rc<RefCell<FakeOtpState>>,
}

impl OtpSession for FakeOtpSession {
    fn calculate(
        &mut self,
        slot: OtpSlot,
        challenge: u64,
        _totp: bool,
        digits: u8,
        wait_for_touch: bool,
    ) -> Result<String, OtpEngineError> {
        let state = self.state.borrow();
        let config = state.slots[slot.index()]
            .as_ref()
            .ok_or(OtpEngineError::EmptySlot)?;
        if config.touch_required {
            if !wait_for_touch {
                // The hardware reports the same error for an unread
                // touch-required slot as for an empty one.
                return Err(OtpEngineError::EmptySlot);
            }
            if !state.user_touches {
                return Err(OtpEngineError::TouchTimeout);
            }
        }
        let modulus = 10u64.pow(u32::from(digits));
        Ok(format!(
            "{:0width$}",
            challenge % modulus,
            width = digits as usize
        ))
    }

    fn program_challenge_response(
        &mut self,
        slot: OtpSlot,
        key: &[u8],
        touch_required: bool,
    ) -> Result<(), OtpEngineError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.program_error.clone() {
            return Err(error);
        }
        state.slots[slot.index()] = Some(FakeSlotConfig {
            key: key.to_vec(),
            touch_required,
        });
        Ok(())
    }

    fn erase_slot(&mut self, slot: OtpSlot) -> Result<(), OtpEngineError> {
        self.state.borrow_mut().slots[slot.index()] = None;
        Ok(())
    }

    fn slot_status(&mut self) -> Result<[bool; 2], OtpEngineError> {
        let state = self.state.borrow();
        Ok([state.slots[0].is_some(), state.slots[1].is_some()])
    }
}

#[derive(Clone)]
pub struct FakeHandle {
    pub fingerprint: String,
    pub mode: TransportMode,
    pub name: String,
    pub serial: Option<u32>,
    pub usb_supported: TransportMode,
    pub fail_open: bool,
    pub oath: Rc<RefCell<FakeOathState>>,
    pub otp: Rc<RefCell<FakeOtpState>>,
    pub oath_opens: Rc<Cell<usize>>,
    pub otp_opens: Rc<Cell<usize>>,
}

impl FakeHandle {
    pub fn new(fingerprint: &str, transports: &[Transport]) -> Self {
        Self {
            fingerprint: fingerprint.to_string(),
            mode: TransportMode::from_transports(transports),
            name: "YubiKey 5 NFC".to_string(),
            serial: Some(9_681_623),
            usb_supported: TransportMode::from_transports(&Transport::ALL),
            fail_open: false,
            oath: Rc::new(RefCell::new(FakeOathState::default())),
            otp: Rc::new(RefCell::new(FakeOtpState::default())),
            oath_opens: Rc::new(Cell::new(0)),
            otp_opens: Rc::new(Cell::new(0)),
        }
    }
}

impl DeviceHandle for FakeHandle {
    type Oath = FakeOathSession;
    type Otp = FakeOtpSession;

    fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    fn mode(&self) -> TransportMode {
        self.mode
    }

    fn device_name(&self) -> String {
        self.name.clone()
    }

    fn serial(&self) -> Option<u32> {
        self.serial
    }

    fn usb_supported(&self) -> TransportMode {
        self.usb_supported
    }

    fn open_oath(&self) -> Result<Self::Oath, DiscoveryError> {
        self.oath_opens.set(self.oath_opens.get() + 1);
        if self.fail_open {
            return Err(DiscoveryError::OpenFailed {
                transport: Transport::Ccid.name().to_string(),
                reason: "device unplugged".to_string(),
            });
        }
        Ok(FakeOathSession::new(Rc::clone(&self.oath)))
    }

    fn open_otp(&self) -> Result<Self::Otp, DiscoveryError> {
        self.otp_opens.set(self.otp_opens.get() + 1);
        if self.fail_open {
            return Err(DiscoveryError::OpenFailed {
                transport: Transport::Otp.name().to_string(),
                reason: "device unplugged".to_string(),
            });
        }
        Ok(FakeOtpSession {
            state: Rc::clone(&self.otp),
        })
    }
}

/// Discovery fake whose device lists are shared, so tests can plug and
/// unplug devices between polls on the same controller.
#[derive(Clone, Default)]
pub struct FakeDiscovery {
    pub descriptors: Rc<RefCell<Vec<FakeHandle>>>,
    pub readers: Rc<RefCell<Vec<FakeHandle>>>,
    pub fail: Rc<Cell<bool>>,
}

impl FakeDiscovery {
    pub fn with_descriptors(descriptors: Vec<FakeHandle>) -> Self {
        Self {
            descriptors: Rc::new(RefCell::new(descriptors)),
            ..Default::default()
        }
    }

    pub fn with_readers(readers: Vec<FakeHandle>) -> Self {
        Self {
            readers: Rc::new(RefCell::new(readers)),
            ..Default::default()
        }
    }
}

impl DeviceDiscovery for FakeDiscovery {
    type Handle = FakeHandle;

    fn list_smart_card_devices(
        &self,
        exclude_key_readers: bool,
    ) -> Result<Vec<Self::Handle>, DiscoveryError> {
        if self.fail.get() {
            return Err(DiscoveryError::Enumeration {
                reason: "transport unavailable".to_string(),
            });
        }
        let mut devices = self.readers.borrow().clone();
        if !exclude_key_readers {
            devices.extend(self.descriptors.borrow().clone());
        }
        Ok(devices)
    }

    fn list_all_descriptors(&self) -> Result<Vec<Self::Handle>, DiscoveryError> {
        if self.fail.get() {
            return Err(DiscoveryError::Enumeration {
                reason: "transport unavailable".to_string(),
            });
        }
        Ok(self.descriptors.borrow().clone())
    }
}

/// Scanner that reports a fixed payload, or nothing.
#[derive(Clone, Default)]
pub struct FakeScanner {
    pub payload: Option<String>,
    pub fail: bool,
}

impl QrScanner for FakeScanner {
    fn scan_one(&self, _image: &PixelImage) -> Result<Option<String>, QrError> {
        if self.fail {
            return Err(QrError::Scan {
                reason: "decoder crashed".to_string(),
            });
        }
        Ok(self.payload.clone())
    }
}
