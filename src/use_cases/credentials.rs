//! OATH credential orchestrator
//!
//! CRUD and code calculation over the OATH credential set. Query paths
//! degrade silently (empty or `None`) so polling loops stay resilient;
//! mutating paths surface failures, except for the two user-visible
//! conditions that come back as messages: a malformed secret and a full
//! device.

use tracing::debug;

use crate::error::{OathEngineError, YkauthResult};
use crate::logic::parse_base32_key;
use crate::model::{Code, Credential, CredentialData, HashAlgorithm, OathType};
use crate::ports::{DeviceHandle, KeyStore, OathSession};
use crate::use_cases::UnlockManager;

/// Normalized message for a full device.
pub const NO_SPACE: &str = "No space";

/// Caller input for a new OATH credential; the secret is still base32.
#[derive(Debug, Clone)]
pub struct AddCredentialRequest {
    pub name: String,
    pub secret_base32: String,
    pub issuer: Option<String>,
    pub oath_type: OathType,
    pub algorithm: HashAlgorithm,
    pub digits: u8,
    pub period: u32,
    pub touch: bool,
}

/// Calculates codes for every stored credential at `timestamp`, dropping
/// hidden credentials. Any failure yields the empty list.
pub fn list_with_codes<H: DeviceHandle, S: KeyStore>(
    handle: &H,
    unlock: &mut UnlockManager<S>,
    timestamp: u64,
) -> Vec<(Credential, Option<Code>)> {
    let mut session = match handle.open_oath() {
        Ok(session) => session,
        Err(e) => {
            debug!(error = %e, "failed to open OATH session");
            return Vec::new();
        }
    };
    if !unlock.unlock(&mut session) {
        return Vec::new();
    }
    match session.calculate_all(timestamp) {
        Ok(entries) => entries
            .into_iter()
            .filter(|(credential, _)| !credential.is_hidden())
            .collect(),
        Err(e) => {
            debug!(error = %e, "calculate_all failed");
            Vec::new()
        }
    }
}

/// Calculates the code for a single credential. `None` on any failure.
pub fn calculate<H: DeviceHandle, S: KeyStore>(
    handle: &H,
    unlock: &mut UnlockManager<S>,
    credential: &Credential,
    timestamp: u64,
) -> Option<Code> {
    let mut session = match handle.open_oath() {
        Ok(session) => session,
        Err(e) => {
            debug!(error = %e, "failed to open OATH session");
            return None;
        }
    };
    if !unlock.unlock(&mut session) {
        return None;
    }
    match session.calculate(credential, timestamp) {
        Ok(code) => Some(code),
        Err(e) => {
            debug!(error = %e, "calculate failed");
            None
        }
    }
}

/// Stores a new credential with an initial counter of zero.
///
/// A malformed secret or a full device comes back as `Ok(Some(message))`;
/// any other engine failure is fatal and propagates.
pub fn add<H: DeviceHandle, S: KeyStore>(
    handle: &H,
    unlock: &mut UnlockManager<S>,
    request: &AddCredentialRequest,
) -> YkauthResult<Option<String>> {
    let mut session = handle.open_oath()?;
    unlock.unlock(&mut session);
    let secret = match parse_base32_key(&request.secret_base32) {
        Ok(secret) => secret,
        Err(e) => return Ok(Some(e.to_string())),
    };
    let data = CredentialData {
        secret,
        issuer: request.issuer.clone(),
        name: request.name.clone(),
        oath_type: request.oath_type,
        algorithm: request.algorithm,
        digits: request.digits,
        period: request.period,
        counter: 0,
        touch: request.touch,
    };
    match session.put(&data) {
        Ok(()) => Ok(None),
        // The NEO doesn't return a no-space error when full, but a
        // command-aborted error. Assume it's because of no space in this
        // context.
        Err(OathEngineError::NoSpace) | Err(OathEngineError::CommandAborted) => {
            Ok(Some(NO_SPACE.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Deletes a stored credential. Failures propagate.
pub fn delete<H: DeviceHandle, S: KeyStore>(
    handle: &H,
    unlock: &mut UnlockManager<S>,
    credential: &Credential,
) -> YkauthResult<()> {
    let mut session = handle.open_oath()?;
    unlock.unlock(&mut session);
    session.delete(credential)?;
    Ok(())
}

/// Factory-resets the OATH application, destroying all credentials and any
/// password.
pub fn reset<H: DeviceHandle>(handle: &H) -> YkauthResult<()> {
    let mut session = handle.open_oath()?;
    session.reset()?;
    Ok(())
}
