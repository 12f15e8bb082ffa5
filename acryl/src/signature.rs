//! XEdDSA signatures over Curve25519.
//!
//! Accounts hold X25519 (Montgomery) keys, but signatures are Ed25519-shaped:
//! the signer computes the Edwards form of its public key and stores that
//! point's sign bit in the unused top bit of `S`, so a verifier that only has
//! the Montgomery `u` coordinate can recover the Edwards key.
//!
//! Signing is randomized: 64 bytes of fresh entropy are mixed into the nonce
//! hash, so two signatures over the same message differ.

use core::fmt;
use core::str::FromStr;

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::scalar::Scalar;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoding::{from_base58_fixed, to_base58};
use crate::error::{Error, Result};
use crate::hash::sha512_chunks;

/// Domain separator for nonce derivation: `0xFE` followed by 31 `0xFF` bytes.
const NONCE_PREFIX: [u8; 32] = {
    let mut prefix = [0xFF; 32];
    prefix[0] = 0xFE;
    prefix
};

/// A 64-byte XEdDSA signature (`R || S`, sign bit in the top bit of `S`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; 64]);

impl Signature {
    /// Create from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Create from a slice that must be exactly 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        bytes.try_into().map(Self).map_err(|_| {
            Error::InvalidEncoding(format!("signature must be 64 bytes, got {}", bytes.len()))
        })
    }

    /// Get as bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Base58 form used in broadcast payloads.
    pub fn to_base58(&self) -> String {
        to_base58(&self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        from_base58_fixed(s, "signature").map(Self)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sign `message` with a clamped X25519 private key.
pub(crate) fn sign(secret: &[u8; 32], message: &[u8], entropy: &[u8; 64]) -> Signature {
    let a = Scalar::from_bytes_mod_order(*secret);
    let public = EdwardsPoint::mul_base(&a).compress();
    let sign_bit = public.as_bytes()[31] & 0x80;

    let r = Scalar::from_bytes_mod_order_wide(&sha512_chunks(&[
        &NONCE_PREFIX,
        secret,
        message,
        entropy,
    ]));
    let big_r = EdwardsPoint::mul_base(&r).compress();
    let h = Scalar::from_bytes_mod_order_wide(&sha512_chunks(&[
        big_r.as_bytes(),
        public.as_bytes(),
        message,
    ]));
    let s = h * a + r;

    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(big_r.as_bytes());
    bytes[32..].copy_from_slice(s.as_bytes());
    bytes[63] = (bytes[63] & 0x7F) | sign_bit;
    Signature(bytes)
}

/// Verify `signature` over `message` against a Montgomery public key.
///
/// Returns `false` for any malformed key or signature.
pub(crate) fn verify(public: &[u8; 32], message: &[u8], signature: &Signature) -> bool {
    let sig = signature.as_bytes();
    let sign_bit = sig[63] >> 7;

    let Some(a) = MontgomeryPoint(*public).to_edwards(sign_bit) else {
        return false;
    };

    let mut r_bytes = [0u8; 32];
    r_bytes.copy_from_slice(&sig[..32]);
    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&sig[32..]);
    s_bytes[31] &= 0x7F;

    let Some(s) = Option::<Scalar>::from(Scalar::from_canonical_bytes(s_bytes)) else {
        return false;
    };

    let a_bytes = a.compress();
    let h = Scalar::from_bytes_mod_order_wide(&sha512_chunks(&[
        &r_bytes,
        a_bytes.as_bytes(),
        message,
    ]));

    // R == S*B - h*A
    let check = EdwardsPoint::vartime_double_scalar_mul_basepoint(&h, &(-a), &s).compress();
    check.as_bytes() == &r_bytes
}
