//! # Acryl node clients
//!
//! HTTP implementations of [`acryl::NodeClient`] ([`BlockingClient`]) and
//! [`acryl::AsyncNodeClient`] ([`Client`]).
//!
//! ```no_run
//! use acryl::{AddressIdentity, KeySource, Network};
//! use acryl_client::{Client, ClientConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let identity = AddressIdentity::generate(KeySource::seed("my seed"), Network::Mainnet)?;
//! let node = identity.connect_async(Client::new(ClientConfig::default())?);
//! println!("{}", node.balance().await?.balance);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![forbid(unsafe_code)]

pub mod blocking;
pub mod config;
pub mod error;
pub mod nonblocking;
mod request;

pub use blocking::BlockingClient;
pub use config::{ClientConfig, DEFAULT_NODE_ADDRESS};
pub use error::ClientError;
pub use nonblocking::Client;
