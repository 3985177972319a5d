use std::fmt;

/// USB transport a YubiKey application is reachable over.
///
/// The discriminants match the device's reported transport bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    Otp = 0x01,
    Fido = 0x02,
    Ccid = 0x04,
}

impl Transport {
    /// All transports, in bitmask order.
    pub const ALL: [Transport; 3] = [Transport::Otp, Transport::Fido, Transport::Ccid];

    pub fn bit(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Transport::Otp => "OTP",
            Transport::Fido => "FIDO",
            Transport::Ccid => "CCID",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bitmask of the transports currently enabled on a device.
///
/// This is the device's reported mode; a transport absent from the mask is
/// disabled even if the hardware supports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransportMode(u8);

impl TransportMode {
    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn from_transports(transports: &[Transport]) -> Self {
        Self(transports.iter().fold(0, |acc, t| acc | t.bit()))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn has(self, transport: Transport) -> bool {
        self.0 & transport.bit() != 0
    }

    /// Splits the mask into its individual transports, in bitmask order.
    pub fn transports(self) -> Vec<Transport> {
        Transport::ALL
            .iter()
            .copied()
            .filter(|t| self.has(*t))
            .collect()
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.transports().iter().map(|t| t.name()).collect();
        f.write_str(&names.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_has_transport() {
        let mode = TransportMode::from_transports(&[Transport::Otp, Transport::Ccid]);
        assert!(mode.has(Transport::Otp));
        assert!(mode.has(Transport::Ccid));
        assert!(!mode.has(Transport::Fido));
    }

    #[test]
    fn test_mode_split() {
        let mode = TransportMode::from_bits(0x05);
        assert_eq!(mode.transports(), vec![Transport::Otp, Transport::Ccid]);
    }

    #[test]
    fn test_mode_display() {
        let mode = TransportMode::from_transports(&[Transport::Otp, Transport::Fido]);
        assert_eq!(mode.to_string(), "OTP+FIDO");
    }

    #[test]
    fn test_empty_mode() {
        let mode = TransportMode::default();
        assert!(mode.transports().is_empty());
    }
}
