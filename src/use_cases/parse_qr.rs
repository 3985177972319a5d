//! QR ingestion pipeline
//!
//! Turns a raw pixel buffer into at most one provisioning record: the buffer
//! is wrapped as a row-addressable image, the scan collaborator is asked for
//! a single detection, and its payload is parsed as an otpauth:// URI.

use tracing::debug;

use crate::logic::parse_otpauth_uri;
use crate::model::CredentialData;
use crate::ports::{PixelImage, QrScanner};

/// Decodes a pixel buffer into zero or one provisioning record.
///
/// No detection, a scan failure or an undecodable payload all yield `None`.
/// Multiple codes in the buffer are not disambiguated; the scanner returns
/// the first it finds.
pub fn parse<Q: QrScanner>(
    scanner: &Q,
    data: Vec<u8>,
    width: usize,
    height: usize,
) -> Option<CredentialData> {
    let image = PixelImage::new(data, width, height);
    let payload = match scanner.scan_one(&image) {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(e) => {
            debug!(error = %e, "QR scan failed");
            return None;
        }
    };
    match parse_otpauth_uri(&payload) {
        Ok(data) => Some(data),
        Err(e) => {
            debug!(error = %e, "QR payload is not a provisioning URI");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake_device::FakeScanner;
    use data_encoding::BASE32;

    #[test]
    fn test_no_detection_yields_none() {
        let scanner = FakeScanner::default();
        assert_eq!(parse(&scanner, vec![0; 16], 4, 4), None);
    }

    #[test]
    fn test_scan_failure_yields_none() {
        let scanner = FakeScanner {
            fail: true,
            ..Default::default()
        };
        assert_eq!(parse(&scanner, vec![0; 16], 4, 4), None);
    }

    #[test]
    fn test_valid_uri_secret_round_trips_base32() {
        let scanner = FakeScanner {
            payload: Some(
                "otpauth://totp/Example:alice?secret=JBSWY3DPEE&issuer=Example".to_string(),
            ),
            ..Default::default()
        };

        let data = parse(&scanner, vec![0; 16], 4, 4).unwrap();
        assert_eq!(data.name, "alice");
        assert_eq!(BASE32.encode(&data.secret), "JBSWY3DPEE======");
    }

    #[test]
    fn test_non_oath_payload_yields_none() {
        let scanner = FakeScanner {
            payload: Some("https://example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(parse(&scanner, vec![0; 16], 4, 4), None);
    }
}
