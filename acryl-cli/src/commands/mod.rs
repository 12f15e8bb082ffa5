//! CLI command definitions and handlers.

mod account;
pub mod node;

use std::path::PathBuf;

pub use account::{NewCommand, ShowCommand, ValidateCommand};
use acryl::Network;
use acryl_client::ClientConfig;
use clap::{Args, Parser, Subcommand};
pub use node::{BalanceCommand, TransferCommand};

/// Acryl - command-line wallet for the Acryl blockchain.
#[derive(Parser)]
#[command(name = "acryl")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Node API address (overrides the config file).
    #[arg(long, global = true, env = "ACRYL_NODE")]
    pub node: Option<String>,

    /// TOML client configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use testnet addresses (chain id 'K').
    #[arg(long, global = true)]
    pub testnet: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Network selected by `--testnet`.
    pub const fn network(&self) -> Network {
        if self.testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    /// Client configuration: config file, then `--node`.
    pub fn client_config(&self) -> Result<ClientConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };
        if let Some(node) = &self.node {
            config.node_address.clone_from(node);
        }
        Ok(config)
    }
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new account from a random seed phrase.
    New(NewCommand),

    /// Show an account derived from a seed, key or key file.
    Show(ShowCommand),

    /// Check whether an address is valid.
    Validate(ValidateCommand),

    /// Query the balance of an address.
    Balance(BalanceCommand),

    /// Print the node version.
    Version,

    /// Sign and broadcast a transfer.
    #[command(alias = "send")]
    Transfer(TransferCommand),
}
