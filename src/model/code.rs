/// Period every slot-derived TOTP code is pinned to, in seconds.
///
/// Challenge-response slots have no notion of a configured period; codes
/// computed through them are always aligned to 30-second boundaries.
pub const SLOT_PERIOD: u64 = 30;

/// A computed one-time code with its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    /// The displayed digits.
    pub value: String,
    /// Start of the validity window, unix seconds.
    pub valid_from: u64,
    /// End of the validity window, unix seconds. May be a far-future
    /// sentinel for HOTP codes; clamped when crossing the process boundary.
    pub valid_to: u64,
}

impl Code {
    pub fn new(value: impl Into<String>, valid_from: u64, valid_to: u64) -> Self {
        Self {
            value: value.into(),
            valid_from,
            valid_to,
        }
    }

    /// A code read from a challenge-response slot at `timestamp`, valid for
    /// the 30-second period the timestamp falls in.
    pub fn slot_totp(value: impl Into<String>, timestamp: u64) -> Self {
        let valid_from = timestamp - (timestamp % SLOT_PERIOD);
        Self::new(value, valid_from, valid_from + SLOT_PERIOD)
    }
}
