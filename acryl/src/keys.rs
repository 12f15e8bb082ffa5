//! Curve25519 account keys.
//!
//! Private keys are clamped X25519 scalars; public keys are the Montgomery
//! `u` coordinate of `k * B`. Both travel as base58 strings.

use core::fmt;
use core::str::FromStr;

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::scalar::Scalar;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, Zeroizing};

use crate::address::Address;
use crate::encoding::{from_base58, to_base58};
use crate::error::{Error, Result};
use crate::network::Network;
use crate::signature::{self, Signature};
use crate::types::SecretBytes;

/// Length of private and public keys in bytes.
pub const KEY_LENGTH: usize = 32;

/// Apply the X25519 clamp in place.
#[inline]
pub(crate) fn clamp(bytes: &mut [u8; 32]) {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
}

/// Account private key.
///
/// The key is clamped on construction, so any 32-byte input maps to the
/// same scalar X25519 would use.
#[derive(Clone)]
pub struct PrivateKey {
    bytes: SecretBytes<32>,
}

impl PrivateKey {
    /// Generate a new random private key.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS random source fails.
    pub fn random() -> Result<Self> {
        let mut bytes = Zeroizing::new([0u8; 32]);
        getrandom::fill(&mut bytes[..])
            .map_err(|e| Error::key_material(format!("random generation failed: {e}")))?;
        Ok(Self::from_array(*bytes))
    }

    /// Create from 32 raw bytes, clamping them.
    pub fn from_array(mut bytes: [u8; 32]) -> Self {
        clamp(&mut bytes);
        let key = Self {
            bytes: SecretBytes::new(bytes),
        };
        bytes.zeroize();
        key
    }

    /// Create from a slice that must be exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| {
            Error::key_material(format!(
                "private key must be {KEY_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self::from_array(array))
    }

    /// Parse a base58 encoded private key.
    pub fn from_base58(encoded: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            from_base58(encoded)
                .map_err(|e| Error::key_material(format!("private key: {e}")))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Serialize to raw 32 bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        *self.bytes.as_bytes()
    }

    /// Private key in base58 (zeroized on drop).
    pub fn to_base58(&self) -> Zeroizing<String> {
        Zeroizing::new(to_base58(self.bytes.as_bytes()))
    }

    /// Derive the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        let scalar = Scalar::from_bytes_mod_order(*self.bytes.as_bytes());
        let point = EdwardsPoint::mul_base(&scalar).to_montgomery();
        PublicKey(point.to_bytes())
    }

    /// Sign a message with fresh randomness.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS random source fails.
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        let mut entropy = Zeroizing::new([0u8; 64]);
        getrandom::fill(&mut entropy[..])
            .map_err(|e| Error::key_material(format!("random generation failed: {e}")))?;
        Ok(self.sign_with_entropy(message, &entropy))
    }

    /// Sign with caller-provided nonce entropy.
    pub(crate) fn sign_with_entropy(&self, message: &[u8], entropy: &[u8; 64]) -> Signature {
        signature::sign(self.bytes.as_bytes(), message, entropy)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// Account public key (X25519 Montgomery form).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Create from a slice that must be exactly 32 bytes and encode a point
    /// with an Edwards counterpart.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| {
            Error::key_material(format!(
                "public key must be {KEY_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;
        if MontgomeryPoint(array).to_edwards(0).is_none() {
            return Err(Error::key_material("public key is not a curve point"));
        }
        Ok(Self(array))
    }

    /// Parse a base58 encoded public key.
    pub fn from_base58(encoded: &str) -> Result<Self> {
        let bytes =
            from_base58(encoded).map_err(|e| Error::key_material(format!("public key: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// Get as bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Base58 form used in transaction payloads.
    pub fn to_base58(&self) -> String {
        to_base58(&self.0)
    }

    /// Derive the address on the given network.
    pub fn to_address(&self, network: Network) -> Address {
        Address::from_public_key(self, network)
    }

    /// Verify a signature made by the matching private key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        signature::verify(&self.0, message, signature)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_clamp() {
        let mut bytes = [0xFFu8; 32];
        clamp(&mut bytes);
        assert_eq!(bytes[0], 0xF8);
        assert_eq!(bytes[31], 0x7F);

        let mut zeros = [0u8; 32];
        clamp(&mut zeros);
        assert_eq!(zeros[31], 0x40);
    }

    #[test]
    fn test_public_key_matches_x25519_base_mult() {
        // Key pair derived from seed "test-seed", nonce 0.
        let key = PrivateKey::from_array(hex!(
            "e03b053969b744728fb52323ed63ed3bd76b46928ac3760793b810855c0a6b45"
        ));
        assert_eq!(
            key.public_key().as_bytes(),
            &hex!("71f68d9dab68b086a58817821b2c838c43515c28eb6999b2214e237a4c11064e")
        );
    }

    #[test]
    fn test_public_key_deterministic() {
        let key1 = PrivateKey::from_array([42u8; 32]);
        let key2 = PrivateKey::from_array([42u8; 32]);
        assert_eq!(key1.public_key(), key2.public_key());
        assert_eq!(key1.public_key(), key1.public_key());
    }

    #[test]
    fn test_from_bytes_wrong_length() {
        let err = PrivateKey::from_bytes(&[1u8; 31]).unwrap_err();
        assert!(matches!(err, Error::InvalidKeyMaterial(_)));
        assert!(PublicKey::from_bytes(&[1u8; 33]).is_err());
    }

    #[test]
    fn test_base58_roundtrip() {
        let key = PrivateKey::from_array([7u8; 32]);
        let restored = PrivateKey::from_base58(&key.to_base58()).unwrap();
        assert_eq!(restored.to_bytes(), key.to_bytes());

        let public = key.public_key();
        let parsed: PublicKey = public.to_string().parse().unwrap();
        assert_eq!(parsed, public);
    }

    #[test]
    fn test_invalid_base58_is_key_material_error() {
        assert!(matches!(
            PrivateKey::from_base58("0OIl"),
            Err(Error::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn test_public_key_rejects_non_point() {
        // u = p - 1 has no Edwards counterpart.
        let mut minus_one = [0xFFu8; 32];
        minus_one[0] = 0xEC;
        minus_one[31] = 0x7F;
        assert!(PublicKey::from_bytes(&minus_one).is_err());
    }

    #[test]
    fn test_sign_and_verify() {
        let key = PrivateKey::random().unwrap();
        let signature = key.sign(b"payload").unwrap();
        assert!(key.public_key().verify(b"payload", &signature));
    }

    #[test]
    fn test_signature_from_other_key_fails() {
        let alice = PrivateKey::from_array([1u8; 32]);
        let bob = PrivateKey::from_array([2u8; 32]);
        let signature = alice.sign(b"payload").unwrap();
        assert!(!bob.public_key().verify(b"payload", &signature));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let key = PrivateKey::from_array([7u8; 32]);
        assert_eq!(format!("{key:?}"), "PrivateKey([REDACTED])");
    }
}
