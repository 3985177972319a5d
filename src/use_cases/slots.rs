//! OTP challenge-response slot orchestrator
//!
//! Reads and programs the two fixed slots. Slot state is never cached: it is
//! inferred from the typed error of each attempted read. A touch timeout is
//! an expected outcome, not an error. Slot-derived codes are always pinned
//! to a 30-second window regardless of any configured period.

use tracing::{debug, error};

use crate::error::{OtpEngineError, YkauthError, YkauthResult};
use crate::logic::parse_base32_key;
use crate::model::{Code, Credential, OathType, OtpSlot};
use crate::ports::{DeviceHandle, OtpSession};

fn read_slot_code<H: DeviceHandle>(
    handle: &H,
    slot: OtpSlot,
    digits: u8,
    timestamp: u64,
    wait_for_touch: bool,
) -> YkauthResult<Code> {
    let mut session = handle.open_otp()?;
    let value = session.calculate(slot, timestamp, true, digits, wait_for_touch)?;
    Ok(Code::slot_totp(value, timestamp))
}

/// Challenge-response read that blocks until the user touches the device or
/// its own timeout elapses.
///
/// A timeout is an expected outcome and yields `None`; anything else failing
/// is logged at error level and also yields `None`.
pub fn calculate_touch<H: DeviceHandle>(
    handle: &H,
    slot: OtpSlot,
    digits: u8,
    timestamp: u64,
) -> Option<(Credential, Code)> {
    match read_slot_code(handle, slot, digits, timestamp, true) {
        Ok(code) => Some((
            Credential::new(slot.display_name(), OathType::Totp, true),
            code,
        )),
        Err(YkauthError::Otp(OtpEngineError::TouchTimeout)) => {
            debug!(
                slot = slot.number(),
                "timed out, user probably did not touch the device"
            );
            None
        }
        Err(e) => {
            error!(slot = slot.number(), error = %e, "failed to calculate code in slot mode");
            None
        }
    }
}

/// Challenge-response read without waiting for touch.
///
/// Success yields the code with `touch = false`. An empty-slot report means
/// a touch-required credential may be programmed there: the entry comes back
/// with `touch = true` and no code so the caller can retry via the touch
/// path. Any other failure surfaces diagnostically as a credential whose
/// display name is the error text.
pub fn read_non_touch<H: DeviceHandle>(
    handle: &H,
    slot: OtpSlot,
    digits: u8,
    timestamp: u64,
) -> Option<(Credential, Option<Code>)> {
    match read_slot_code(handle, slot, digits, timestamp, false) {
        Ok(code) => Some((
            Credential::new(slot.display_name(), OathType::Totp, false),
            Some(code),
        )),
        Err(YkauthError::Otp(OtpEngineError::EmptySlot)) => Some((
            Credential::new(slot.display_name(), OathType::Totp, true),
            None,
        )),
        Err(e) => Some((Credential::new(e.to_string(), OathType::Totp, true), None)),
    }
}

/// Non-touch reads of whichever slots are enabled, in slot order, dropping
/// entries that produced nothing.
pub fn refresh_both<H: DeviceHandle>(
    handle: &H,
    enabled: [bool; 2],
    digits: [u8; 2],
    timestamp: u64,
) -> Vec<(Credential, Option<Code>)> {
    let mut result = Vec::new();
    for slot in OtpSlot::ALL {
        if !enabled[slot.index()] {
            continue;
        }
        if let Some(entry) = read_non_touch(handle, slot, digits[slot.index()], timestamp) {
            result.push(entry);
        }
    }
    result
}

/// Programs a slot with a challenge-response key.
///
/// A malformed key or an applet rejection comes back as `Ok(Some(message))`;
/// a transport failure opening the session is fatal and propagates.
pub fn add<H: DeviceHandle>(
    handle: &H,
    slot: OtpSlot,
    key_base32: &str,
    touch_required: bool,
) -> YkauthResult<Option<String>> {
    let key = match parse_base32_key(key_base32) {
        Ok(key) => key,
        Err(e) => return Ok(Some(e.to_string())),
    };
    let mut session = handle.open_otp()?;
    match session.program_challenge_response(slot, &key, touch_required) {
        Ok(()) => Ok(None),
        Err(e) => Ok(Some(e.to_string())),
    }
}

/// Erases a slot's programming unconditionally.
pub fn delete<H: DeviceHandle>(handle: &H, slot: OtpSlot) -> YkauthResult<()> {
    let mut session = handle.open_otp()?;
    session.erase_slot(slot)?;
    Ok(())
}

/// Per-slot programmed flags, passed through without interpretation.
pub fn status<H: DeviceHandle>(handle: &H) -> YkauthResult<[bool; 2]> {
    let mut session = handle.open_otp()?;
    Ok(session.slot_status()?)
}
