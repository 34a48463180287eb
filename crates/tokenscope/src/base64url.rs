//! Base64URL codec (RFC 4648 §5)
//!
//! URL-safe Base64 as used throughout OIDC and JOSE: `-`/`_` instead of
//! `+`/`/`, with padding optional. JWT serializations omit the `=` padding,
//! but some producers keep it, so decoding accepts both forms.
//!
//! # Example
//!
//! ```ignore
//! use tokenscope::base64url;
//!
//! // JWT header segment, unpadded
//! let header = base64url::decode("eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9")?;
//! assert_eq!(header, br#"{"alg":"RS256","typ":"JWT"}"#);
//! ```
//!
//! # References
//!
//! - [RFC 4648 §5 - Base 64 Encoding with URL and Filename Safe Alphabet](https://datatracker.ietf.org/doc/html/rfc4648#section-5)
//! - [RFC 7515 §2 - Base64url Encoding](https://datatracker.ietf.org/doc/html/rfc7515#section-2)

use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine, alphabet};

pub use base64::DecodeError;

/// URL-safe engine that emits no padding and decodes padded and unpadded
/// input alike.
const URL_SAFE_INDIFFERENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes URL-safe Base64 text into raw bytes.
///
/// Accepts both padded and unpadded input. Invalid symbols, impossible
/// lengths, and misplaced padding surface a [`DecodeError`]; nothing is
/// suppressed or repaired beyond the optional padding.
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_INDIFFERENT.decode(input)
}

/// Encodes raw bytes as unpadded URL-safe Base64, the form JOSE segments use.
#[must_use]
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_INDIFFERENT.encode(input)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;

    use super::*;

    #[test]
    fn test_decode_unpadded_matches_standard_base64() {
        // Same text in both alphabets; the URL-safe form drops the padding.
        let url_safe = decode("IuOBk-OCk-OBq-OBoeOBryI").unwrap();
        let standard = STANDARD.decode("IuOBk+OCk+OBq+OBoeOBryI=").unwrap();

        assert_eq!(url_safe, standard);
        assert_eq!(url_safe, "\"こんにちは\"".as_bytes());
    }

    #[test]
    fn test_decode_accepts_padded_input() {
        let padded = decode("IuOBk-OCk-OBq-OBoeOBryI=").unwrap();
        let unpadded = decode("IuOBk-OCk-OBq-OBoeOBryI").unwrap();

        assert_eq!(padded, unpadded);
    }

    #[test]
    fn test_decode_jwt_header_segment() {
        let header = decode("eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9").unwrap();
        assert_eq!(header, br#"{"alg":"RS256","typ":"JWT"}"#);
    }

    #[test]
    fn test_encode_is_unpadded_url_safe() {
        let encoded = encode("\"こんにちは\"".as_bytes());

        assert_eq!(encoded, "IuOBk-OCk-OBq-OBoeOBryI");
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn test_round_trip() {
        let samples: &[&[u8]] = &[b"", b"f", b"fo", b"foo", b"foob", b"fooba", b"foobar"];
        for sample in samples {
            assert_eq!(decode(encode(sample)).unwrap(), *sample);
        }
    }

    #[test]
    fn test_decode_rejects_invalid_input() {
        // Standard-alphabet symbols are invalid here.
        assert!(decode("IuOBk+OCk+OBq+OBoeOBryI=").is_err());
        // A single symbol can never form a byte.
        assert!(decode("A").is_err());
        assert!(decode("not base64url!").is_err());
    }
}
