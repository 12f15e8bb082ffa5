//! # Acryl - wallet core library
//!
//! Key derivation, address encoding and transaction signing for the Acryl
//! blockchain, plus the contract an HTTP node client has to satisfy so that
//! an [`AddressIdentity`] can query balances and broadcast transactions.
//!
//! ## Features
//!
//! - **Curve25519 keys**: seeds are hashed into X25519 private keys, addresses
//!   are derived from the Montgomery public key
//! - **XEdDSA signatures**: randomized signatures that verify against the
//!   X25519 public key
//! - **Checked addresses**: base58 with version, chain id and checksum
//! - **Sync and async**: one identity, two collaborator flavours
//!
//! ## Example
//!
//! ```
//! use acryl::{AddressIdentity, KeySource, Network};
//!
//! let identity = AddressIdentity::generate(KeySource::seed("test-seed"), Network::Mainnet)?;
//! let recipient = AddressIdentity::generate(KeySource::seed("recipient-seed"), Network::Mainnet)?;
//!
//! let signed = identity.transfer(recipient.address(), 1000, Some(1))?;
//! assert!(identity.verify(&signed));
//! assert!(identity.validate(&identity.address().to_string()));
//! # Ok::<(), acryl::Error>(())
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::use_self,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::similar_names,
    clippy::option_if_let_else
)]
#![forbid(unsafe_code)]

pub mod address;
pub mod amount;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod identity;
pub mod keyfile;
pub mod keys;
pub mod network;
pub mod node;
pub mod seed;
pub mod signature;
pub mod transaction;
pub mod types;

pub use address::Address;
pub use amount::Acryl;
pub use error::{Error, Result};
pub use identity::{AddressIdentity, AsyncConnectedIdentity, ConnectedIdentity, KeySource};
pub use keyfile::KeyFile;
pub use keys::{PrivateKey, PublicKey};
pub use network::Network;
pub use node::{AsyncNodeClient, Balance, BroadcastResult, NodeClient, VersionInfo};
pub use seed::Seed;
pub use signature::Signature;
pub use transaction::{
    Alias, Burn, CancelLease, Issue, Lease, MassTransfer, MassTransferItem, MassTransferParams,
    Reissue, SignedTransaction, Transaction, TransactionKind, Transfer, TransferParams,
};
pub use types::Id;
