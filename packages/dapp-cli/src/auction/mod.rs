//! Public auction demo
//!
//! - `contracts` - `AuctionFactory` and `PublicAuction` bindings
//! - `forms` - input validation and call data
//! - `client` - contract reads and auction listing
//! - `commands` - the `dapp auction` subcommands

pub mod client;
pub mod commands;
pub mod contracts;
pub mod forms;

use alloy::primitives::Address;
use clap::Subcommand;
use eyre::Result;

use crate::config::AuctionConfig;
use forms::{AddAuctionForm, BidForm};

pub use client::{AuctionClient, AuctionInfo};

#[derive(Debug, Subcommand)]
pub enum AuctionCommand {
    /// List auctions, newest first
    List,

    /// Show one auction
    Show {
        #[arg(long, conflicts_with = "index")]
        address: Option<Address>,

        /// Position in the factory's list
        #[arg(long)]
        index: Option<u64>,

        /// Also show this account's pending returns and last bid
        #[arg(long)]
        account: Option<Address>,
    },

    /// Start a new auction
    Create(AddAuctionForm),

    /// Bid on an auction
    Bid(BidForm),

    /// Withdraw the returns of outbid offers
    Withdraw {
        #[arg(long)]
        auction: Address,
    },

    /// Pay the beneficiary once the auction has ended
    Finalize {
        #[arg(long)]
        auction: Address,
    },
}

pub async fn run(command: &AuctionCommand, config: &AuctionConfig) -> Result<()> {
    match command {
        AuctionCommand::List => commands::list_auctions(config).await,
        AuctionCommand::Show {
            address,
            index,
            account,
        } => commands::show_auction(config, *address, *index, *account).await,
        AuctionCommand::Create(form) => commands::create_auction(config, form).await,
        AuctionCommand::Bid(form) => commands::bid(config, form).await,
        AuctionCommand::Withdraw { auction } => commands::withdraw(config, *auction).await,
        AuctionCommand::Finalize { auction } => commands::finalize(config, *auction).await,
    }
}
