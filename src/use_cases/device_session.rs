//! Device session controller
//!
//! Tracks the active device across repeated refresh polls and detects
//! identity or mode changes via the discovery layer's fingerprint. Refresh
//! is called on a UI heartbeat, so the unchanged path must be cheap and no
//! device-I/O failure may cross the boundary as an error: everything
//! degrades to "no device".

use tracing::debug;

use crate::model::{DeviceSnapshot, Transport};
use crate::ports::{DeviceDiscovery, DeviceHandle, OathSession};

struct ActiveDevice<H> {
    handle: H,
    snapshot: DeviceSnapshot,
}

pub struct DeviceSessionController<D: DeviceDiscovery> {
    discovery: D,
    active: Option<ActiveDevice<D::Handle>>,
}

impl<D: DeviceDiscovery> DeviceSessionController<D> {
    pub fn new(discovery: D) -> Self {
        Self {
            discovery,
            active: None,
        }
    }

    /// Devices currently visible on the transports relevant to `otp_mode`:
    /// directly connected keys, plus external smart-card readers when not in
    /// OTP mode. Enumeration failures count as zero visible devices.
    pub fn count_devices(&self, otp_mode: bool) -> usize {
        let descriptors = self.discovery.list_all_descriptors().unwrap_or_else(|e| {
            debug!(error = %e, "descriptor enumeration failed");
            Vec::new()
        });
        if otp_mode {
            return descriptors.len();
        }
        let readers = self
            .discovery
            .list_smart_card_devices(true)
            .unwrap_or_else(|e| {
                debug!(error = %e, "reader enumeration failed");
                Vec::new()
            });
        descriptors.len() + readers.len()
    }

    /// Refreshes the active-device cache and returns the current snapshot.
    ///
    /// Returns `None` unless exactly one candidate device is visible; zero
    /// and two-or-more are treated identically. A candidate whose mode lacks
    /// the requested transport yields an unusable snapshot without opening a
    /// session. A session is opened only when the fingerprint changed since
    /// the last successful refresh or the version is still unknown.
    pub fn refresh(&mut self, otp_mode: bool) -> Option<DeviceSnapshot> {
        let descriptors = match self.discovery.list_all_descriptors() {
            Ok(descriptors) => descriptors,
            Err(e) => {
                debug!(error = %e, "descriptor enumeration failed");
                self.active = None;
                return None;
            }
        };
        let readers = if otp_mode {
            Vec::new()
        } else {
            match self.discovery.list_smart_card_devices(true) {
                Ok(readers) => readers,
                Err(e) => {
                    debug!(error = %e, "reader enumeration failed");
                    self.active = None;
                    return None;
                }
            }
        };

        if descriptors.len() + readers.len() != 1 {
            self.active = None;
            return None;
        }

        // Prefer a non-YubiKey smart-card reader when not in OTP mode.
        let candidate = match readers.into_iter().next() {
            Some(reader) => reader,
            None => descriptors.into_iter().next()?,
        };

        let required = if otp_mode {
            Transport::Otp
        } else {
            Transport::Ccid
        };
        if !candidate.mode().has(required) {
            return Some(DeviceSnapshot::Unusable {
                transports: candidate.mode().transports(),
            });
        }

        let unchanged = self.active.as_ref().is_some_and(|active| {
            active.handle.fingerprint() == candidate.fingerprint()
                && (otp_mode || active.snapshot.version().is_some())
        });
        if unchanged {
            return self.active.as_ref().map(|active| active.snapshot.clone());
        }

        let version = if otp_mode {
            match candidate.open_otp() {
                Ok(_) => None,
                Err(e) => {
                    debug!(error = %e, "failed to refresh device");
                    self.active = None;
                    return None;
                }
            }
        } else {
            match candidate.open_oath() {
                Ok(session) => Some(session.version()),
                Err(e) => {
                    debug!(error = %e, "failed to refresh device");
                    self.active = None;
                    return None;
                }
            }
        };

        let snapshot = DeviceSnapshot::Usable {
            name: candidate.device_name(),
            version,
            serial: candidate
                .serial()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            usb_supported: candidate.usb_supported().transports(),
            usb_enabled: candidate.mode().transports(),
        };
        self.active = Some(ActiveDevice {
            handle: candidate,
            snapshot: snapshot.clone(),
        });
        Some(snapshot)
    }

    /// Handle of the device cached by the last successful refresh.
    pub fn active_handle(&self) -> Option<&D::Handle> {
        self.active.as_ref().map(|active| &active.handle)
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}
