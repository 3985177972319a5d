pub mod base32;
pub mod otpauth;

pub use base32::parse_base32_key;
pub use otpauth::parse_otpauth_uri;
