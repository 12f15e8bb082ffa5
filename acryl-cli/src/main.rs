//! Acryl - command-line wallet for the Acryl blockchain.
//!
//! Generate and inspect accounts, check balances and send ACRYL.

mod commands;
pub mod qr;

use clap::Parser;
use commands::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let global = cli.global;
    match cli.command {
        Commands::New(cmd) => cmd.execute(&global)?,
        Commands::Show(cmd) => cmd.execute(&global)?,
        Commands::Validate(cmd) => cmd.execute(&global)?,
        Commands::Balance(cmd) => cmd.execute(&global).await?,
        Commands::Version => commands::node::version(&global).await?,
        Commands::Transfer(cmd) => cmd.execute(&global).await?,
    }
    Ok(())
}
