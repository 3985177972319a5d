//! Ports (traits) for the external collaborators
//!
//! These traits define the capabilities the controller requires from the
//! outside world: device discovery, the OATH and OTP credential engines, the
//! persisted key store and the QR scanner. They are ports in hexagonal
//! architecture - the core depends on these abstractions, not on concrete
//! transport or crypto implementations.

mod discovery;
mod key_store;
mod oath;
mod otp;
mod qr;

pub use discovery::{DeviceDiscovery, DeviceHandle};
pub use key_store::KeyStore;
pub use oath::OathSession;
pub use otp::OtpSession;
pub use qr::{PixelImage, QrScanner};
