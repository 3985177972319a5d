//! otpauth:// provisioning URI parsing
//!
//! Decodes the URI payload of a provisioning QR code into a
//! [`CredentialData`] record. Format:
//! `otpauth://{totp|hotp}/[issuer:]name?secret=...&issuer=...&algorithm=...`
//! where an `issuer` query parameter overrides an issuer prefix in the label.

use thiserror::Error;

use crate::logic::base32::{parse_base32_key, Base32Error};
use crate::model::{CredentialData, HashAlgorithm, OathType, DEFAULT_PERIOD};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error("Not an otpauth:// URI")]
    WrongScheme,

    #[error("Unknown OATH type in URI: {value}")]
    UnknownType { value: String },

    #[error("Missing secret parameter")]
    MissingSecret,

    #[error("Invalid secret: {0}")]
    InvalidSecret(#[from] Base32Error),

    #[error("Invalid {field} parameter: {value}")]
    InvalidParameter { field: &'static str, value: String },
}

pub fn parse_otpauth_uri(uri: &str) -> Result<CredentialData, UriError> {
    let rest = uri
        .strip_prefix("otpauth://")
        .ok_or(UriError::WrongScheme)?;

    let (oath_type_str, rest) = rest.split_once('/').ok_or(UriError::WrongScheme)?;
    let oath_type = match oath_type_str {
        "totp" => OathType::Totp,
        "hotp" => OathType::Hotp,
        other => {
            return Err(UriError::UnknownType {
                value: other.to_string(),
            })
        }
    };

    let (label, query) = match rest.split_once('?') {
        Some((label, query)) => (label, query),
        None => (rest, ""),
    };

    let label = percent_decode(label);
    let (label_issuer, name) = match label.split_once(':') {
        Some((issuer, name)) => (Some(issuer.to_string()), name.to_string()),
        None => (None, label),
    };

    let mut secret = None;
    let mut issuer = label_issuer;
    let mut algorithm = HashAlgorithm::Sha1;
    let mut digits: u8 = 6;
    let mut period: u32 = DEFAULT_PERIOD;
    let mut counter: u32 = 0;

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, percent_decode(value)),
            None => (pair, String::new()),
        };
        match key {
            "secret" => secret = Some(parse_base32_key(&value)?),
            "issuer" => issuer = Some(value),
            "algorithm" => {
                algorithm =
                    HashAlgorithm::from_name(&value).map_err(|_| UriError::InvalidParameter {
                        field: "algorithm",
                        value: value.clone(),
                    })?
            }
            "digits" => {
                digits = value.parse().map_err(|_| UriError::InvalidParameter {
                    field: "digits",
                    value: value.clone(),
                })?
            }
            "period" => {
                period = value.parse().map_err(|_| UriError::InvalidParameter {
                    field: "period",
                    value: value.clone(),
                })?
            }
            "counter" => {
                counter = value.parse().map_err(|_| UriError::InvalidParameter {
                    field: "counter",
                    value: value.clone(),
                })?
            }
            _ => {}
        }
    }

    Ok(CredentialData {
        secret: secret.ok_or(UriError::MissingSecret)?,
        issuer,
        name,
        oath_type,
        algorithm,
        digits,
        period,
        counter,
        touch: false,
    })
}

fn percent_decode(value: &str) -> String {
    fn hex_digit(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
