use std::fmt;

use crate::model::Transport;

/// Firmware version reported by a device application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version(pub u8, pub u8, pub u8);

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

/// Normalized snapshot of the active device, recomputed by the session
/// controller only when the device identity changes.
///
/// `Unusable` is returned when the live device's mode does not include the
/// transport the caller asked for; no session is opened in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSnapshot {
    Usable {
        name: String,
        /// OATH application version; unknown when the device was only
        /// refreshed in OTP mode.
        version: Option<Version>,
        /// Reported serial number, empty string when the device has none.
        serial: String,
        usb_supported: Vec<Transport>,
        usb_enabled: Vec<Transport>,
    },
    Unusable {
        transports: Vec<Transport>,
    },
}

impl DeviceSnapshot {
    pub fn usable(&self) -> bool {
        matches!(self, DeviceSnapshot::Usable { .. })
    }

    pub fn version(&self) -> Option<Version> {
        match self {
            DeviceSnapshot::Usable { version, .. } => *version,
            DeviceSnapshot::Unusable { .. } => None,
        }
    }
}
