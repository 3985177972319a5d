//! Process-boundary DTOs
//!
//! The controller's typed values are converted to flat serde structs at the
//! process boundary; the core stays free of serialization concerns. The
//! shapes match what remote callers expect: flat dicts with snake_case keys
//! and a `usable` flag on device snapshots.

use serde::{Deserialize, Serialize};

use crate::model::{
    Code, Credential, CredentialData, CredentialError, DeviceSnapshot, OathType,
};

/// Largest `valid_to` that crosses the boundary; the interchange format has
/// no representation for an unbounded validity.
pub const MAX_VALID_TO: u64 = 9_999_999_999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDto {
    pub key: String,
    pub issuer: Option<String>,
    pub name: String,
    pub oath_type: String,
    pub period: u32,
    pub touch: bool,
}

impl From<&Credential> for CredentialDto {
    fn from(credential: &Credential) -> Self {
        Self {
            key: credential.key_string(),
            issuer: credential.issuer(),
            name: credential.name(),
            oath_type: credential.oath_type.name().to_string(),
            period: credential.period(),
            touch: credential.touch,
        }
    }
}

/// Rebuilds the credential reference a remote caller passed back in.
pub fn credential_from_dto(dto: &CredentialDto) -> Result<Credential, CredentialError> {
    Ok(Credential::new(
        dto.key.clone().into_bytes(),
        OathType::from_name(&dto.oath_type)?,
        dto.touch,
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDto {
    pub value: String,
    pub valid_from: u64,
    pub valid_to: u64,
}

impl From<&Code> for CodeDto {
    fn from(code: &Code) -> Self {
        Self {
            value: code.value.clone(),
            valid_from: code.valid_from,
            valid_to: code.valid_to.min(MAX_VALID_TO),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDto {
    pub credential: CredentialDto,
    pub code: Option<CodeDto>,
}

pub fn pair_to_dto(credential: &Credential, code: Option<&Code>) -> PairDto {
    PairDto {
        credential: credential.into(),
        code: code.map(CodeDto::from),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDataDto {
    pub secret: String,
    pub issuer: Option<String>,
    pub name: String,
    pub oath_type: String,
    pub algorithm: String,
    pub digits: u8,
    pub period: u32,
    pub counter: u32,
    pub touch: bool,
}

impl From<&CredentialData> for CredentialDataDto {
    fn from(data: &CredentialData) -> Self {
        Self {
            secret: data_encoding::BASE32.encode(&data.secret),
            issuer: data.issuer.clone(),
            name: data.name.clone(),
            oath_type: data.oath_type.name().to_string(),
            algorithm: data.algorithm.name().to_string(),
            digits: data.digits,
            period: data.period,
            counter: data.counter,
            touch: data.touch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDto {
    pub usable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<[u8; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usb_interfaces_supported: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usb_interfaces_enabled: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<String>>,
}

impl From<&DeviceSnapshot> for SnapshotDto {
    fn from(snapshot: &DeviceSnapshot) -> Self {
        match snapshot {
            DeviceSnapshot::Usable {
                name,
                version,
                serial,
                usb_supported,
                usb_enabled,
            } => Self {
                usable: true,
                name: Some(name.clone()),
                version: version.map(|v| [v.0, v.1, v.2]),
                serial: Some(serial.clone()),
                usb_interfaces_supported: Some(
                    usb_supported.iter().map(|t| t.name().to_string()).collect(),
                ),
                usb_interfaces_enabled: Some(
                    usb_enabled.iter().map(|t| t.name().to_string()).collect(),
                ),
                transports: None,
            },
            DeviceSnapshot::Unusable { transports } => Self {
                usable: false,
                name: None,
                version: None,
                serial: None,
                usb_interfaces_supported: None,
                usb_interfaces_enabled: None,
                transports: Some(transports.iter().map(|t| t.name().to_string()).collect()),
            },
        }
    }
}
