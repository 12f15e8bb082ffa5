//! Account commands: `new`, `show`, `validate`.

use std::path::PathBuf;

use acryl::{Address, AddressIdentity, Error, KeySource, Network, PrivateKey, PublicKey, Seed};
use clap::Args;
use colored::Colorize;

use super::GlobalArgs;

/// Key material options shared by commands that need an account.
#[derive(Args, Debug, Default)]
pub struct KeyArgs {
    /// Seed phrase.
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Account nonce used with `--seed`.
    #[arg(short, long, default_value = "0")]
    pub nonce: u32,

    /// Base58 private key.
    #[arg(long)]
    pub private_key: Option<String>,

    /// Base58 public key (watch-only).
    #[arg(long)]
    pub public_key: Option<String>,

    /// JSON key file written by `acryl new --save`.
    #[arg(short, long, conflicts_with_all = ["seed", "private_key", "public_key"])]
    pub key_file: Option<PathBuf>,
}

impl KeyArgs {
    /// Derive the identity described by these options.
    ///
    /// A key file carries its own network; otherwise `network` is used.
    pub fn identity(&self, network: Network) -> Result<AddressIdentity, Error> {
        if let Some(path) = &self.key_file {
            return AddressIdentity::load(path);
        }

        let seed = self.seed.as_deref().map(|s| Seed::new(s, self.nonce));
        let private_key = self
            .private_key
            .as_deref()
            .map(PrivateKey::from_base58)
            .transpose()?;
        let public_key = self
            .public_key
            .as_deref()
            .map(PublicKey::from_base58)
            .transpose()?;

        match KeySource::resolve(seed, private_key, public_key)? {
            KeySource::Random => Err(Error::key_material(
                "no key material: pass --seed, --private-key, --public-key or --key-file",
            )),
            source => AddressIdentity::generate(source, network),
        }
    }
}

/// Generate a new account.
#[derive(Args)]
pub struct NewCommand {
    /// Account nonce.
    #[arg(short, long, default_value = "0")]
    nonce: u32,

    /// Write the account to a JSON key file.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Display QR code for the address.
    #[arg(long)]
    qr: bool,
}

impl NewCommand {
    /// Execute the `new` command.
    pub fn execute(self, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
        let seed = Seed::random(self.nonce)?;
        let identity = AddressIdentity::generate(KeySource::Seed(seed), global.network())?;
        if let Some(path) = &self.save {
            identity.save(path)?;
        }
        print_identity(&identity, self.qr);
        if let Some(path) = &self.save {
            println!("      {}        {}", "Saved".cyan().bold(), path.display());
            println!();
        }
        Ok(())
    }
}

/// Show an existing account.
#[derive(Args)]
pub struct ShowCommand {
    #[command(flatten)]
    keys: KeyArgs,

    /// Display QR code for the address.
    #[arg(long)]
    qr: bool,
}

impl ShowCommand {
    /// Execute the `show` command.
    pub fn execute(self, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
        let identity = self.keys.identity(global.network())?;
        print_identity(&identity, self.qr);
        Ok(())
    }
}

/// Validate an address.
#[derive(Args)]
pub struct ValidateCommand {
    /// Base58 address.
    address: String,
}

impl ValidateCommand {
    /// Execute the `validate` command.
    pub fn execute(self, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
        let address = Address::parse_for(&self.address, global.network())?;
        println!();
        println!("      {}      {}", "Address".cyan().bold(), address.to_string().green());
        println!("      {}      {}", "Network".cyan().bold(), address.network());
        println!("      {}        {}", "Valid".cyan().bold(), "yes".green());
        println!();
        Ok(())
    }
}

#[rustfmt::skip]
fn print_identity(identity: &AddressIdentity, show_qr: bool) {
    println!();
    if let Some(seed) = identity.seed() {
        println!("      {}         {}", "Seed".cyan().bold(), seed.phrase());
        println!("      {}        {}", "Nonce".cyan().bold(), seed.nonce().to_string().dimmed());
    }
    println!("      {}      {}", "Network".cyan().bold(), identity.network().to_string().dimmed());
    println!("      {}      {}", "Address".cyan().bold(), identity.address().to_string().green());
    println!("      {}   {}", "Public Key".cyan().bold(), identity.public_key());
    match identity.private_key() {
        Some(key) => println!("      {}  {}", "Private Key".cyan().bold(), key.to_base58().as_str()),
        None => println!("      {}  {}", "Private Key".cyan().bold(), "(watch-only)".dimmed()),
    }
    if show_qr {
        crate::qr::render_to_terminal(&identity.address().to_string());
    }
    println!();
}
