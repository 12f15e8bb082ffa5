//! Seed phrases and deterministic account derivation.
//!
//! A seed is any string. The account private key for `(seed, nonce)` is
//!
//! ```text
//! clamp(sha256(secure_hash(be_u32(nonce) || utf8(seed))))
//! ```
//!
//! so one phrase yields a family of accounts indexed by nonce.

use core::fmt;

use bip39::Mnemonic;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::hash::{secure_hash, sha256};
use crate::keys::PrivateKey;

/// Entropy for freshly generated phrases (160 bits, 15 words).
const RANDOM_ENTROPY_BYTES: usize = 20;

/// A secret seed phrase with its account nonce.
#[derive(Clone)]
pub struct Seed {
    phrase: Zeroizing<String>,
    nonce: u32,
}

impl Seed {
    /// Wrap an existing phrase.
    pub fn new(phrase: impl Into<String>, nonce: u32) -> Self {
        Self {
            phrase: Zeroizing::new(phrase.into()),
            nonce,
        }
    }

    /// Generate a random 15-word English BIP-39 phrase.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS random source fails.
    pub fn random(nonce: u32) -> Result<Self> {
        let mut entropy = Zeroizing::new([0u8; RANDOM_ENTROPY_BYTES]);
        getrandom::fill(&mut entropy[..])
            .map_err(|e| Error::key_material(format!("random generation failed: {e}")))?;
        Self::from_entropy(&entropy[..], nonce)
    }

    /// Build a BIP-39 phrase from raw entropy (16, 20, 24, 28 or 32 bytes).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mnemonic`] if the entropy length is invalid.
    pub fn from_entropy(entropy: &[u8], nonce: u32) -> Result<Self> {
        let mnemonic = Mnemonic::from_entropy(entropy)?;
        Ok(Self::new(mnemonic.to_string(), nonce))
    }

    /// Get the phrase.
    ///
    /// **Security Warning**: anyone holding the phrase controls every
    /// account derived from it.
    #[inline]
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Account nonce.
    #[inline]
    #[must_use]
    pub const fn nonce(&self) -> u32 {
        self.nonce
    }

    /// Same phrase, different nonce.
    #[must_use]
    pub fn with_nonce(&self, nonce: u32) -> Self {
        Self {
            phrase: self.phrase.clone(),
            nonce,
        }
    }

    /// Derive the account private key.
    pub fn private_key(&self) -> PrivateKey {
        let mut input = Zeroizing::new(Vec::with_capacity(4 + self.phrase.len()));
        input.extend_from_slice(&self.nonce.to_be_bytes());
        input.extend_from_slice(self.phrase.as_bytes());
        let account_seed = Zeroizing::new(secure_hash(&input));
        PrivateKey::from_array(sha256(&*account_seed))
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("phrase", &"[REDACTED]")
            .field("nonce", &self.nonce)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_known_answer() {
        let key = Seed::new("test-seed", 0).private_key();
        assert_eq!(
            key.to_base58().as_str(),
            "G6JXHqT2exvkRRhF1BidqWDT46EfRQry45bGdCN7qdwz"
        );
        assert_eq!(
            key.public_key().to_base58(),
            "8fs87tBVCX8aNJpvrNViazy8v7eaJnuULNWx6CvKrP1F"
        );
    }

    #[test]
    fn test_nonce_changes_account() {
        let key = Seed::new("test-seed", 1).private_key();
        assert_eq!(
            key.to_base58().as_str(),
            "ZsfDw6kApvmvWB3kYMTEZzjByEQsSfNw1TueJ97sPdH"
        );
        assert_eq!(
            key.public_key().to_base58(),
            "GoKh7imtxzsh4P8ur2HqMdcmMgTYGWGhgfY87WRu3CJk"
        );
    }

    #[test]
    fn test_mnemonic_phrase_derivation() {
        let seed = Seed::new(
            "manage manual recall harvest series desert melt police rose hollow moral pledge kitten position add",
            0,
        );
        let key = seed.private_key();
        assert_eq!(
            key.to_base58().as_str(),
            "3kMEhU5z3v8bmer1ERFUUhW58Dtuhyo9hE5vrhjqAWYT"
        );
        assert_eq!(
            key.public_key().to_base58(),
            "HBqhfdFASRQ5eBBpu2y6c6KKi1az6bMx8v1JxX4iW1Q8"
        );
    }

    #[test]
    fn test_random_is_fifteen_words() {
        let seed = Seed::random(0).unwrap();
        assert_eq!(seed.phrase().split_whitespace().count(), 15);
        assert!(seed.phrase().parse::<Mnemonic>().is_ok());
    }

    #[test]
    fn test_from_entropy_zero() {
        let seed = Seed::from_entropy(&[0u8; 20], 0).unwrap();
        let expected = format!("{}address", "abandon ".repeat(14));
        assert_eq!(seed.phrase(), expected);
    }

    #[test]
    fn test_from_entropy_invalid_length() {
        assert!(matches!(
            Seed::from_entropy(&[0u8; 15], 0),
            Err(Error::Mnemonic(_))
        ));
    }

    #[test]
    fn test_with_nonce() {
        let seed = Seed::new("test-seed", 0).with_nonce(1);
        assert_eq!(seed.nonce(), 1);
        assert_eq!(seed.phrase(), "test-seed");
    }

    #[test]
    fn test_debug_redacts_phrase() {
        let debug = format!("{:?}", Seed::new("secret words", 3));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("nonce: 3"));
    }
}
