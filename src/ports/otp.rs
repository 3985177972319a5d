use crate::error::OtpEngineError;
use crate::model::OtpSlot;

/// One open session against the legacy OTP applet and its two fixed slots.
///
/// Slot state is never cached: emptiness and touch requirements are inferred
/// fresh from the typed error of each attempted operation.
pub trait OtpSession {
    /// Issue a challenge-response calculation against a slot.
    ///
    /// With `wait_for_touch`, blocks until the device produces a code or its
    /// own touch timeout elapses ([`OtpEngineError::TouchTimeout`]). An
    /// unprogrammed slot surfaces as [`OtpEngineError::EmptySlot`].
    fn calculate(
        &mut self,
        slot: OtpSlot,
        challenge: u64,
        totp: bool,
        digits: u8,
        wait_for_touch: bool,
    ) -> Result<String, OtpEngineError>;

    /// Program a slot with a challenge-response key.
    fn program_challenge_response(
        &mut self,
        slot: OtpSlot,
        key: &[u8],
        touch_required: bool,
    ) -> Result<(), OtpEngineError>;

    /// Erase a slot's programming unconditionally.
    fn erase_slot(&mut self, slot: OtpSlot) -> Result<(), OtpEngineError>;

    /// Per-slot programmed flags, in slot order, without interpretation.
    fn slot_status(&mut self) -> Result<[bool; 2], OtpEngineError>;
}
