//! JSON key files.
//!
//! A key file stores everything needed to restore an [`AddressIdentity`]:
//!
//! ```json
//! {
//!   "address": "3EXZoKW6FXoN3Y9fmGsGCPkttJSWaKUPmfN",
//!   "private_key": "G6JXHqT2exvkRRhF1BidqWDT46EfRQry45bGdCN7qdwz",
//!   "public_key": "8fs87tBVCX8aNJpvrNViazy8v7eaJnuULNWx6CvKrP1F",
//!   "seed": "test-seed",
//!   "nonce": 0,
//!   "chain_id": "A"
//! }
//! ```
//!
//! On load the keys are re-derived and must reproduce the stored address.

use core::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::identity::{AddressIdentity, KeySource};
use crate::keys::{PrivateKey, PublicKey};
use crate::network::Network;
use crate::seed::Seed;

/// Serialized form of an identity. Secret fields are wiped on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyFile {
    /// Base58 address.
    pub address: String,
    /// Base58 private key, absent for watch-only identities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// Base58 public key.
    pub public_key: String,
    /// Seed phrase, if the identity was derived from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    /// Account nonce used with the seed.
    #[serde(default)]
    pub nonce: u32,
    /// Chain id as a one-character string, the byte read as a code point.
    pub chain_id: String,
}

impl fmt::Debug for KeyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyFile")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("nonce", &self.nonce)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl KeyFile {
    // The chain id byte is stored as the code point U+0000..=U+00FF.
    fn network(&self) -> Result<Network> {
        let mut chars = self.chain_id.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => u8::try_from(c).map(Network::from_chain_id).map_err(|_| {
                Error::key_material(format!("chain id {c:?} is not a single byte"))
            }),
            _ => Err(Error::key_material(format!(
                "chain id must be one character, got \"{}\"",
                self.chain_id
            ))),
        }
    }

    /// Parse a key file from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl AddressIdentity {
    /// Export the identity, secrets included.
    pub fn to_key_file(&self) -> KeyFile {
        KeyFile {
            address: self.address().to_string(),
            private_key: self.private_key().map(|k| k.to_base58().to_string()),
            public_key: self.public_key().to_base58(),
            seed: self.seed().map(|s| s.phrase().to_owned()),
            nonce: self.seed().map_or(0, Seed::nonce),
            chain_id: char::from(self.network().chain_id()).to_string(),
        }
    }

    /// Restore an identity from a key file.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyMaterial`] if the stored keys disagree with each
    /// other or with the stored address.
    pub fn from_key_file(file: &KeyFile) -> Result<Self> {
        let network = file.network()?;
        let seed = file.seed.as_deref().map(|s| Seed::new(s, file.nonce));
        let private_key = file
            .private_key
            .as_deref()
            .map(PrivateKey::from_base58)
            .transpose()?;
        let public_key = PublicKey::from_base58(&file.public_key)?;

        let source = KeySource::resolve(seed, private_key, Some(public_key))?;
        let identity = Self::generate(source, network)?;
        if identity.address().to_string() != file.address {
            return Err(Error::key_material(format!(
                "stored address {} does not match key material ({})",
                file.address,
                identity.address()
            )));
        }
        Ok(identity)
    }

    /// Write the identity to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_key_file().to_json()?)?;
        debug!(path = %path.display(), address = %self.address(), "key file written");
        Ok(())
    }

    /// Read an identity from a JSON key file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = zeroize::Zeroizing::new(fs::read_to_string(path)?);
        let identity = Self::from_key_file(&KeyFile::from_json(&json)?)?;
        debug!(path = %path.display(), address = %identity.address(), "key file loaded");
        Ok(identity)
    }
}
