//! Retryable Ticket CLI
//!
//! Every subcommand is configured through environment variables (a `.env`
//! file is loaded if present) and checks them before touching the network.

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing::info;

use retryable_ticket::commands;
use retryable_ticket::config::{BothChainsConfig, DeployL1Config, DeployL2Config, UpdateL1Config};

#[derive(Parser)]
#[command(name = "retryable-ticket")]
#[command(about = "L1 -> L2 retryable ticket demo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy and verify the L1 contract
    DeployL1,

    /// Deploy and verify the L2 contract
    DeployL2,

    /// Set the L2 target of the L1 contract
    UpdateL1,

    /// Print the values held by both contracts
    Show,

    /// Update the L2 contract from L1 through a retryable ticket
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    crosslayer_rs::load_dotenv();
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::DeployL1 => {
            let config = DeployL1Config::load()?;
            commands::deploy_l1(&config).await?;
        }
        Commands::DeployL2 => {
            let config = DeployL2Config::load()?;
            commands::deploy_l2(&config).await?;
        }
        Commands::UpdateL1 => {
            let config = UpdateL1Config::load()?;
            commands::update_l1(&config).await?;
        }
        Commands::Show => {
            let config = BothChainsConfig::load()?;
            commands::show(&config).await?;
        }
        Commands::Demo => {
            let config = BothChainsConfig::load()?;
            let status = commands::demo(&config).await?;
            info!(status = %status, "Demo finished");
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,retryable_ticket=debug,crosslayer_rs=info")
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}
