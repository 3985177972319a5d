//! Error types for the ykauth library
//!
//! This module defines the error hierarchy for all ykauth operations.
//! Errors are organized hierarchically and use thiserror for implementation.
//!
//! Expected user-interaction outcomes (touch timeout, empty slot) and
//! capacity conditions (no space, the legacy command-aborted misreport) are
//! distinct variants so callers pattern-match instead of inspecting raw
//! status words or errno values.

use thiserror::Error;

/// Result type alias for ykauth operations
///
/// This is a convenience alias for `Result<T, YkauthError>`.
pub type YkauthResult<T> = Result<T, YkauthError>;

/// Top-level error type for all ykauth operations
#[derive(Error, Debug)]
pub enum YkauthError {
    /// Device discovery and transport errors
    #[error("Device error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// OATH application command errors
    #[error("OATH application error: {0}")]
    Oath(#[from] OathEngineError),

    /// OTP challenge-response applet errors
    #[error("OTP applet error: {0}")]
    Otp(#[from] OtpEngineError),

    /// Persisted key-store errors
    #[error("Key store error: {0}")]
    Store(#[from] StoreError),

    /// QR scanning errors
    #[error("QR scan error: {0}")]
    Qr(#[from] QrError),
}

/// Device discovery and transport errors
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Enumerating connected devices failed
    #[error("Failed to enumerate devices: {reason}")]
    Enumeration { reason: String },

    /// Opening a session on a device failed
    #[error("Failed to open device over {transport}: {reason}")]
    OpenFailed { transport: String, reason: String },

    /// An operation was requested while no device is active
    #[error("No active device - refresh must see exactly one device first")]
    NoActiveDevice,
}

/// Errors reported by the OATH credential engine
///
/// `NoSpace` and `CommandAborted` are separate variants: the YubiKey NEO
/// reports a full credential store as a command-aborted condition, and the
/// credential orchestrator maps both to the same caller-visible outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OathEngineError {
    /// Device has no storage left for another credential
    #[error("No space left on device")]
    NoSpace,

    /// Device aborted the command (NEO misreport of a full device)
    #[error("Command aborted by device")]
    CommandAborted,

    /// The supplied unlock key was rejected
    #[error("Unlock key rejected by device")]
    ValidationFailed,

    /// Any other OATH command failure
    #[error("OATH command failed: {reason}")]
    Failed { reason: String },
}

/// Errors reported by the OTP challenge-response applet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpEngineError {
    /// The user did not touch the device within its timeout
    #[error("Timed out waiting for touch")]
    TouchTimeout,

    /// The slot has no challenge-response credential programmed
    #[error("No credential programmed in slot")]
    EmptySlot,

    /// Any other OTP command failure
    #[error("OTP command failed: {reason}")]
    Failed { reason: String },
}

/// Persisted key-store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Loading the persisted store failed
    #[error("Failed to load key store from {location}: {reason}")]
    Load { location: String, reason: String },

    /// Writing the persisted store failed
    #[error("Failed to write key store to {location}: {reason}")]
    Write { location: String, reason: String },
}

/// QR scanning errors
#[derive(Error, Debug)]
pub enum QrError {
    /// The scan collaborator failed on the supplied buffer
    #[error("QR scan failed: {reason}")]
    Scan { reason: String },
}
