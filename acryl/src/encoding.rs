//! Base58 helpers for keys, ids, signatures and attachments.

use crate::error::{Error, Result};

/// Encode bytes to base58 (Bitcoin alphabet).
#[inline]
pub fn to_base58(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode a base58 string of any length.
pub fn from_base58(encoded: &str) -> Result<Vec<u8>> {
    bs58::decode(encoded)
        .into_vec()
        .map_err(|e| Error::InvalidEncoding(format!("{e}")))
}

/// Decode a base58 string that must hold exactly `N` bytes.
///
/// `what` names the value in the error message ("public key", "asset id", ...).
pub fn from_base58_fixed<const N: usize>(encoded: &str, what: &str) -> Result<[u8; N]> {
    let bytes = from_base58(encoded)?;
    bytes.as_slice().try_into().map_err(|_| {
        Error::InvalidEncoding(format!(
            "{what} must be {N} bytes, got {}",
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_known_value() {
        assert_eq!(to_base58(b"hello world"), "StV1DL6CwTryKyV");
        assert_eq!(from_base58("StV1DL6CwTryKyV").unwrap(), b"hello world");
    }

    #[test]
    fn test_leading_zeros_preserved() {
        let encoded = to_base58(&[0, 0, 1]);
        assert_eq!(encoded, "112");
        assert_eq!(from_base58(&encoded).unwrap(), vec![0, 0, 1]);
    }

    #[test]
    fn test_invalid_alphabet() {
        // 0, O, I and l are not in the alphabet
        assert!(matches!(from_base58("0OIl"), Err(Error::InvalidEncoding(_))));
    }

    #[test]
    fn test_fixed_length() {
        let encoded = to_base58(&[7u8; 32]);
        let decoded: [u8; 32] = from_base58_fixed(&encoded, "key").unwrap();
        assert_eq!(decoded, [7u8; 32]);

        let err = from_base58_fixed::<16>(&encoded, "key").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid encoding: key must be 16 bytes, got 32"
        );
    }
}
