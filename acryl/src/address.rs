//! Acryl account addresses.
//!
//! An address is 26 raw bytes rendered as base58:
//!
//! ```text
//! 0x01 | chain id | secure_hash(public key)[..20] | checksum[..4]
//! ```
//!
//! The checksum is `secure_hash` over the first 22 bytes.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoding::{from_base58, to_base58};
use crate::error::{Error, Result};
use crate::hash::secure_hash;
use crate::keys::PublicKey;
use crate::network::Network;

/// Address version byte.
pub const ADDRESS_VERSION: u8 = 1;

/// Raw address length in bytes.
pub const ADDRESS_LENGTH: usize = 26;

const HASH_LENGTH: usize = 20;
const CHECKSUM_LENGTH: usize = 4;
const BODY_LENGTH: usize = ADDRESS_LENGTH - CHECKSUM_LENGTH;

/// A decoded, checksum-verified Acryl address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Derive the address of a public key on `network`.
    #[must_use]
    pub fn from_public_key(public_key: &PublicKey, network: Network) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[0] = ADDRESS_VERSION;
        bytes[1] = network.chain_id();
        bytes[2..BODY_LENGTH].copy_from_slice(&secure_hash(public_key.as_bytes())[..HASH_LENGTH]);
        let checksum = secure_hash(&bytes[..BODY_LENGTH]);
        bytes[BODY_LENGTH..].copy_from_slice(&checksum[..CHECKSUM_LENGTH]);
        Self(bytes)
    }

    /// Decode raw address bytes, checking length, version and checksum.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|_| {
            Error::InvalidAddress(format!(
                "expected {ADDRESS_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;
        if array[0] != ADDRESS_VERSION {
            return Err(Error::InvalidAddress(format!(
                "unknown version {}",
                array[0]
            )));
        }
        let checksum = secure_hash(&array[..BODY_LENGTH]);
        if array[BODY_LENGTH..] != checksum[..CHECKSUM_LENGTH] {
            return Err(Error::InvalidAddress("checksum mismatch".into()));
        }
        Ok(Self(array))
    }

    /// Parse an address and require it to belong to `network`.
    pub fn parse_for(s: &str, network: Network) -> Result<Self> {
        let address: Self = s.parse()?;
        if address.network().chain_id() != network.chain_id() {
            return Err(Error::InvalidAddress(format!(
                "address is for {}, expected {network}",
                address.network()
            )));
        }
        Ok(address)
    }

    /// Whether `s` is a well-formed address on `network`.
    ///
    /// Never panics; any decoding failure yields `false`.
    #[must_use]
    pub fn is_valid(s: &str, network: Network) -> bool {
        Self::parse_for(s, network).is_ok()
    }

    /// Network the address was derived for.
    #[inline]
    #[must_use]
    pub const fn network(&self) -> Network {
        Network::from_chain_id(self.0[1])
    }

    /// Get as bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_base58(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = from_base58(s).map_err(|_| Error::InvalidAddress(format!("not base58: {s}")))?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SEED_ADDRESS: &str = "3EXZoKW6FXoN3Y9fmGsGCPkttJSWaKUPmfN";
    const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

    fn test_seed_key() -> PublicKey {
        "8fs87tBVCX8aNJpvrNViazy8v7eaJnuULNWx6CvKrP1F".parse().unwrap()
    }

    #[test]
    fn test_from_public_key_mainnet() {
        let address = Address::from_public_key(&test_seed_key(), Network::Mainnet);
        assert_eq!(address.to_string(), TEST_SEED_ADDRESS);
        assert_eq!(
            hex::encode(address.as_bytes()),
            "0141e724dd18fb66104edfb3f9c64fc2ff6621022bc571703601"
        );
    }

    #[test]
    fn test_from_public_key_testnet() {
        let address = Address::from_public_key(&test_seed_key(), Network::Testnet);
        assert_eq!(address.to_string(), "3JYwqAb58dbzoiV4dX4bPF1ckbV61UZdRUQ");
        assert_eq!(address.network(), Network::Testnet);
    }

    #[test]
    fn test_parse_roundtrip() {
        let address: Address = TEST_SEED_ADDRESS.parse().unwrap();
        assert_eq!(address.to_string(), TEST_SEED_ADDRESS);
        assert_eq!(address.network(), Network::Mainnet);
    }

    #[test]
    fn test_is_valid_checks_network() {
        assert!(Address::is_valid(TEST_SEED_ADDRESS, Network::Mainnet));
        assert!(!Address::is_valid(TEST_SEED_ADDRESS, Network::Testnet));
    }

    #[test]
    fn test_single_character_mutation_fails() {
        let chars: Vec<char> = TEST_SEED_ADDRESS.chars().collect();
        for i in 0..chars.len() {
            for replacement in BASE58_ALPHABET.chars().filter(|c| *c != chars[i]) {
                let mut mutated = chars.clone();
                mutated[i] = replacement;
                let mutated: String = mutated.into_iter().collect();
                assert!(
                    !Address::is_valid(&mutated, Network::Mainnet),
                    "mutation at {i} to {replacement} accepted: {mutated}"
                );
            }
        }
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        for input in ["", "0OIl", "3EXZoKW6FXoN3Y9f", "not an address at all"] {
            assert!(!Address::is_valid(input, Network::Mainnet));
        }
    }

    #[test]
    fn test_wrong_version_rejected() {
        let mut bytes = *Address::from_public_key(&test_seed_key(), Network::Mainnet).as_bytes();
        bytes[0] = 2;
        let err = Address::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)));
    }

    #[test]
    fn test_serde_as_string() {
        let address: Address = TEST_SEED_ADDRESS.parse().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{TEST_SEED_ADDRESS}\""));
    }
}
