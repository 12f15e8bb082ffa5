//! Commands that talk to a node: `balance`, `version`, `transfer`.

use acryl::{Acryl, Address, AsyncNodeClient, TransferParams};
use acryl_client::Client;
use clap::Args;
use colored::Colorize;
use tracing::debug;

use super::account::KeyArgs;
use super::GlobalArgs;

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn client(global: &GlobalArgs) -> Result<Client, Box<dyn std::error::Error>> {
    let config = global.client_config()?;
    debug!(node = %config.node_address, "using node");
    Ok(Client::new(config)?)
}

fn acryl_amount(s: &str) -> Result<Acryl, String> {
    s.parse().map_err(|e: acryl::Error| e.to_string())
}

/// Query a balance.
#[derive(Args)]
pub struct BalanceCommand {
    /// Base58 address.
    address: String,

    /// Show the effective (generating) balance as well.
    #[arg(short, long)]
    effective: bool,
}

impl BalanceCommand {
    /// Execute the `balance` command.
    pub async fn execute(self, global: &GlobalArgs) -> CliResult {
        let address = Address::parse_for(&self.address, global.network())?;
        let client = client(global)?;

        let balance = client.balance(&address).await?;
        println!();
        println!("      {}      {}", "Address".cyan().bold(), address.to_string().green());
        println!("      {}      {}", "Balance".cyan().bold(), Acryl::from_units(balance.balance));
        if self.effective {
            let effective = client.effective_balance(&address).await?;
            println!("      {}    {}", "Effective".cyan().bold(), Acryl::from_units(effective.balance));
        }
        println!();
        Ok(())
    }
}

/// Execute the `version` command.
pub async fn version(global: &GlobalArgs) -> CliResult {
    let client = client(global)?;
    let info = client.node_version().await?;
    println!("{}", info.version);
    Ok(())
}

/// Send ACRYL.
#[derive(Args)]
pub struct TransferCommand {
    #[command(flatten)]
    keys: KeyArgs,

    /// Recipient address.
    #[arg(short, long)]
    to: String,

    /// Amount in ACRYL, up to 8 decimals.
    #[arg(short, long, value_parser = acryl_amount)]
    amount: Acryl,

    /// Fee in ACRYL [default: 0.001].
    #[arg(short, long, value_parser = acryl_amount)]
    fee: Option<Acryl>,

    /// Attachment text (at most 140 bytes).
    #[arg(long)]
    attachment: Option<String>,

    /// Print the signed transaction instead of broadcasting it.
    #[arg(long)]
    dry_run: bool,
}

impl TransferCommand {
    /// Build the unsigned transfer parameters.
    fn params(&self, network: acryl::Network) -> Result<TransferParams, Box<dyn std::error::Error>> {
        let recipient = Address::parse_for(&self.to, network)?;
        let mut params = TransferParams::new(recipient, units(self.amount)?);
        if let Some(fee) = self.fee {
            params = params.fee(units(fee)?);
        }
        if let Some(attachment) = &self.attachment {
            params = params.attachment(attachment.as_bytes());
        }
        Ok(params)
    }

    /// Execute the `transfer` command.
    pub async fn execute(self, global: &GlobalArgs) -> CliResult {
        let identity = self.keys.identity(global.network())?;
        let signed = identity.transfer_with(self.params(identity.network())?)?;

        if self.dry_run {
            println!("{}", serde_json::to_string_pretty(&signed)?);
            return Ok(());
        }

        let connected = identity.connect_async(client(global)?);
        let result = connected.broadcast(&signed).await?;
        println!();
        println!("      {}           {}", "Id".cyan().bold(), signed.id().to_string().green());
        println!("      {}       {}", "Amount".cyan().bold(), self.amount);
        if let Some(node_id) = result.id.filter(|id| *id != signed.id().to_string()) {
            println!("      {}      {}", "Node Id".cyan().bold(), node_id.yellow());
        }
        println!();
        Ok(())
    }
}

fn units(amount: Acryl) -> Result<i64, Box<dyn std::error::Error>> {
    Ok(i64::try_from(amount.as_units())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    const RECIPIENT_ADDRESS: &str = "3ESULF5zussA682zSYRSkKAGrwQ5roo6TVA";

    fn parse_transfer(args: &[&str]) -> TransferCommand {
        let cli = Cli::try_parse_from(
            ["acryl", "transfer", "--seed", "test-seed", "--to", RECIPIENT_ADDRESS]
                .iter()
                .chain(args)
                .copied(),
        )
        .unwrap();
        match cli.command {
            Commands::Transfer(cmd) => cmd,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_amount_parsed_exactly() {
        let cmd = parse_transfer(&["--amount", "1.5", "--fee", "0.001"]);
        let params = cmd.params(acryl::Network::Mainnet).unwrap();
        assert_eq!(params.amount, 150_000_000);
        assert_eq!(params.fee, Some(100_000));
        assert_eq!(params.recipient.to_string(), RECIPIENT_ADDRESS);
    }

    #[test]
    fn test_rejects_bad_amount() {
        let result = Cli::try_parse_from([
            "acryl", "transfer", "--seed", "s", "--to", RECIPIENT_ADDRESS, "--amount", "0.000000001",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_recipient_network_checked() {
        let cmd = parse_transfer(&["--amount", "1"]);
        assert!(cmd.params(acryl::Network::Testnet).is_err());
    }

    #[tokio::test]
    async fn test_dry_run_does_not_need_node() {
        let cmd = parse_transfer(&["--amount", "0.00001", "--dry-run"]);
        let global = GlobalArgs {
            node: Some("http://127.0.0.1:1".into()),
            ..GlobalArgs::default()
        };
        cmd.execute(&global).await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_amount_fails_before_broadcast() {
        let cmd = parse_transfer(&["--amount", "0"]);
        let global = GlobalArgs {
            node: Some("http://127.0.0.1:1".into()),
            ..GlobalArgs::default()
        };
        let err = cmd.execute(&global).await.unwrap_err();
        let err = err.downcast::<acryl::Error>().unwrap();
        assert!(matches!(*err, acryl::Error::InvalidAmount { field: "amount", .. }));
    }
}
