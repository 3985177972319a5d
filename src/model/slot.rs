use thiserror::Error;

/// One of the two fixed challenge-response slots on the OTP applet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpSlot {
    One,
    Two,
}

impl OtpSlot {
    /// Both slots, in slot order.
    pub const ALL: [OtpSlot; 2] = [OtpSlot::One, OtpSlot::Two];

    pub fn number(self) -> u8 {
        match self {
            OtpSlot::One => 1,
            OtpSlot::Two => 2,
        }
    }

    pub fn index(self) -> usize {
        (self.number() - 1) as usize
    }

    pub fn from_number(number: u8) -> Result<Self, SlotError> {
        match number {
            1 => Ok(OtpSlot::One),
            2 => Ok(OtpSlot::Two),
            other => Err(SlotError::OutOfRange { slot: other }),
        }
    }

    /// Display name synthesized for codes read out of this slot.
    pub fn display_name(self) -> String {
        format!("YubiKey Slot {}", self.number())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    #[error("Slot out of range: {slot} (must be 1 or 2)")]
    OutOfRange { slot: u8 },
}
