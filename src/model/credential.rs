use thiserror::Error;

/// OATH credential type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OathType {
    Hotp,
    Totp,
}

impl OathType {
    pub fn name(self) -> &'static str {
        match self {
            OathType::Hotp => "HOTP",
            OathType::Totp => "TOTP",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CredentialError> {
        match name {
            "HOTP" | "hotp" => Ok(OathType::Hotp),
            "TOTP" | "totp" => Ok(OathType::Totp),
            other => Err(CredentialError::UnknownOathType {
                value: other.to_string(),
            }),
        }
    }
}

/// Hash algorithm backing an OATH credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CredentialError> {
        match name {
            "SHA1" | "sha1" => Ok(HashAlgorithm::Sha1),
            "SHA256" | "sha256" => Ok(HashAlgorithm::Sha256),
            "SHA512" | "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(CredentialError::UnknownAlgorithm {
                value: other.to_string(),
            }),
        }
    }
}

/// Default TOTP period in seconds; omitted from the credential key.
pub const DEFAULT_PERIOD: u32 = 30;

/// Issuer value marking a credential as hidden from listings.
const HIDDEN_ISSUER: &str = "_hidden";

/// A credential stored on the device.
///
/// The key is the device's identifier for the credential, formatted as
/// `[period "/"] [issuer ":"] name` where the period prefix is only present
/// for TOTP credentials with a non-default period. Uniqueness of keys is
/// enforced by the credential engine, not by this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub key: Vec<u8>,
    pub oath_type: OathType,
    pub touch: bool,
}

impl Credential {
    pub fn new(key: impl Into<Vec<u8>>, oath_type: OathType, touch: bool) -> Self {
        Self {
            key: key.into(),
            oath_type,
            touch,
        }
    }

    pub fn key_string(&self) -> String {
        String::from_utf8_lossy(&self.key).into_owned()
    }

    fn parts(&self) -> (u32, Option<String>, String) {
        let key = self.key_string();
        let (period, rest) = match key.split_once('/') {
            Some((prefix, rest)) if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) => {
                (prefix.parse().unwrap_or(DEFAULT_PERIOD), rest)
            }
            _ => (DEFAULT_PERIOD, key.as_str()),
        };
        match rest.split_once(':') {
            Some((issuer, name)) => (period, Some(issuer.to_string()), name.to_string()),
            None => (period, None, rest.to_string()),
        }
    }

    pub fn period(&self) -> u32 {
        self.parts().0
    }

    pub fn issuer(&self) -> Option<String> {
        self.parts().1
    }

    pub fn name(&self) -> String {
        self.parts().2
    }

    pub fn is_hidden(&self) -> bool {
        self.issuer().as_deref() == Some(HIDDEN_ISSUER)
    }
}

/// A provisioning record, produced by caller input or QR decoding, not yet
/// written to the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialData {
    pub secret: Vec<u8>,
    pub issuer: Option<String>,
    pub name: String,
    pub oath_type: OathType,
    pub algorithm: HashAlgorithm,
    pub digits: u8,
    pub period: u32,
    pub counter: u32,
    pub touch: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Unknown OATH type: {value}")]
    UnknownOathType { value: String },

    #[error("Unknown algorithm: {value}")]
    UnknownAlgorithm { value: String },
}
