//! Domain model types
//!
//! Value types shared across the controller: transports, device snapshots,
//! credentials, codes and OTP slots. All are plain data, returned by value;
//! device state is never mutated through them.

mod code;
mod credential;
mod device;
mod slot;
mod transport;

pub use code::{Code, SLOT_PERIOD};
pub use credential::{
    Credential, CredentialData, CredentialError, HashAlgorithm, OathType, DEFAULT_PERIOD,
};
pub use device::{DeviceSnapshot, Version};
pub use slot::{OtpSlot, SlotError};
pub use transport::{Transport, TransportMode};
