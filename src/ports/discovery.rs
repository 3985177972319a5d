use crate::error::DiscoveryError;
use crate::model::TransportMode;
use crate::ports::{OathSession, OtpSession};

/// A connected device as seen by the discovery layer, before any session is
/// opened.
///
/// Handles are re-obtained on every discovery poll and never mutated. The
/// fingerprint identifies the physical key together with its current mode;
/// the session controller uses it to detect identity changes between polls.
pub trait DeviceHandle {
    type Oath: OathSession;
    type Otp: OtpSession;

    /// Stable identity of the physical key and its current mode.
    fn fingerprint(&self) -> &str;

    /// Transports currently enabled on the device.
    fn mode(&self) -> TransportMode;

    /// Human-readable device name.
    fn device_name(&self) -> String;

    /// Reported serial number, if the device exposes one.
    fn serial(&self) -> Option<u32>;

    /// Transports the hardware supports over USB, enabled or not.
    fn usb_supported(&self) -> TransportMode;

    /// Open a session against the OATH application (smart-card transport).
    fn open_oath(&self) -> Result<Self::Oath, DiscoveryError>;

    /// Open a session against the OTP applet (keyboard transport).
    fn open_otp(&self) -> Result<Self::Otp, DiscoveryError>;
}

/// Capability to enumerate connected devices per transport.
pub trait DeviceDiscovery {
    type Handle: DeviceHandle;

    /// Devices visible as smart-card readers. With `exclude_key_readers`,
    /// readers that are themselves YubiKeys are filtered out, leaving only
    /// external readers a key may be inserted into.
    fn list_smart_card_devices(
        &self,
        exclude_key_readers: bool,
    ) -> Result<Vec<Self::Handle>, DiscoveryError>;

    /// All directly connected key descriptors, regardless of transport.
    fn list_all_descriptors(&self) -> Result<Vec<Self::Handle>, DiscoveryError>;
}
