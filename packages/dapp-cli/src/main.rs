//! dApp CLI
//!
//! Reads are open to anyone; writes need `PRIVATE_KEY`. A `.env` file is
//! loaded if present.

use clap::{Parser, Subcommand};
use eyre::Result;

use dapp_cli::auction::{self, AuctionCommand};
use dapp_cli::config::{AuctionConfig, HotelConfig};
use dapp_cli::hotel::{self, HotelCommand};

#[derive(Parser)]
#[command(name = "dapp")]
#[command(about = "Hotel booking and public auction demo client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hotel booking
    #[command(subcommand)]
    Hotel(HotelCommand),

    /// Public auctions
    #[command(subcommand)]
    Auction(AuctionCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    crosslayer_rs::load_dotenv();
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hotel(command) => {
            let config = HotelConfig::load()?;
            hotel::run(&command, &config).await?;
        }
        Commands::Auction(command) => {
            let config = AuctionConfig::load()?;
            auction::run(&command, &config).await?;
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dapp_cli=debug,crosslayer_rs=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}
