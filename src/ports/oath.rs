use crate::error::OathEngineError;
use crate::model::{Code, Credential, CredentialData, Version};

/// One open session against the device's OATH application.
///
/// Sessions are short-lived: opened, used for one logical operation and
/// dropped before the caller returns. Key derivation and code arithmetic
/// happen on the engine side; this layer only orchestrates.
pub trait OathSession {
    /// Whether the application requires an unlock key before use.
    fn locked(&self) -> bool;

    /// Identifier of this OATH application instance, used as the key under
    /// which derived unlock keys are persisted.
    fn id(&self) -> &[u8];

    /// OATH application version.
    fn version(&self) -> Version;

    /// Validate an unlock key against the application.
    fn validate(&mut self, key: &[u8]) -> Result<(), OathEngineError>;

    /// Derive an unlock key from a password for this application instance.
    fn derive_key(&self, password: &str) -> Result<Vec<u8>, OathEngineError>;

    /// Set a new password, returning the derived key now protecting the
    /// application.
    fn set_password(&mut self, password: &str) -> Result<Vec<u8>, OathEngineError>;

    /// Remove password protection entirely.
    fn clear_password(&mut self) -> Result<(), OathEngineError>;

    /// Calculate codes for every stored credential at `timestamp`.
    ///
    /// Credentials that require touch or are HOTP come back without a code.
    fn calculate_all(
        &mut self,
        timestamp: u64,
    ) -> Result<Vec<(Credential, Option<Code>)>, OathEngineError>;

    /// Calculate the code for a single credential at `timestamp`.
    fn calculate(&mut self, credential: &Credential, timestamp: u64)
        -> Result<Code, OathEngineError>;

    /// Store a new credential. A full device surfaces as
    /// [`OathEngineError::NoSpace`], or [`OathEngineError::CommandAborted`]
    /// on NEO-family hardware.
    fn put(&mut self, data: &CredentialData) -> Result<(), OathEngineError>;

    /// Delete a stored credential.
    fn delete(&mut self, credential: &Credential) -> Result<(), OathEngineError>;

    /// Factory-reset the application: all credentials and any password are
    /// destroyed.
    fn reset(&mut self) -> Result<(), OathEngineError>;
}
