//! Use cases - the stateful orchestration layer
//!
//! The device session controller and unlock manager own the only mutable
//! state in the crate; credential, slot and QR operations are free functions
//! over an active device handle.

pub mod credentials;
mod device_session;
pub mod parse_qr;
pub mod slots;
mod unlock;

pub use credentials::{AddCredentialRequest, NO_SPACE};
pub use device_session::DeviceSessionController;
pub use unlock::UnlockManager;
