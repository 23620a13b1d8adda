//! `dapp auction ...` subcommands

use alloy::primitives::Address;
use crosslayer_rs::evm::{EvmReader, EvmWriter};
use crosslayer_rs::units::format_ether;
use eyre::Result;
use tracing::{info, warn};

use super::client::{auctions_listing, newest_first, AuctionClient};
use super::forms::{finalize_calldata, withdraw_calldata, AddAuctionForm, BidForm};
use crate::config::AuctionConfig;
use crate::format_timestamp;
use crate::notify::Notifier;

fn signer(config: &AuctionConfig) -> Result<(EvmWriter, Notifier)> {
    let private_key = config.chain.private_key()?;
    Ok((
        EvmWriter::new(&config.chain.rpc_url, private_key.expose())?,
        Notifier::new(&config.chain.explorer_url),
    ))
}

pub async fn list_auctions(config: &AuctionConfig) -> Result<()> {
    let reader = EvmReader::new(&config.chain.rpc_url)?;
    let client = AuctionClient::new(&reader, config.factory);

    let addresses = newest_first(client.auctions().await?);
    info!(factory = %config.factory, count = addresses.len(), "Loaded auctions");

    let mut auctions = Vec::with_capacity(addresses.len());
    for address in addresses {
        auctions.push(client.info(address).await?);
    }
    for line in auctions_listing(&auctions) {
        println!("{}", line);
    }
    Ok(())
}

/// One auction, by address or by factory index, plus an account's standing
pub async fn show_auction(
    config: &AuctionConfig,
    auction: Option<Address>,
    index: Option<u64>,
    account: Option<Address>,
) -> Result<()> {
    let reader = EvmReader::new(&config.chain.rpc_url)?;
    let client = AuctionClient::new(&reader, config.factory);

    let auction = match (auction, index) {
        (Some(address), _) => address,
        (None, Some(index)) => client.auction_at(index).await?,
        (None, None) => return Err(eyre::eyre!("Pass --address or --index")),
    };

    for line in client.info(auction).await?.display_lines() {
        println!("{}", line);
    }

    if let Some(account) = account {
        let pending = client.pending_returns(auction, account).await?;
        let last_bid = client.last_bid_time(auction, account).await?;
        println!("  {}:", account);
        println!("    Pending Returns: {} ETH", format_ether(pending));
        if !last_bid.is_zero() {
            println!("    Last Bid: {}", format_timestamp(last_bid));
        }
    }
    Ok(())
}

pub async fn create_auction(config: &AuctionConfig, form: &AddAuctionForm) -> Result<()> {
    let (writer, notifier) = signer(config)?;
    let auction = form.validate(writer.address())?;

    info!(
        beneficiary = %auction.beneficiary,
        bidding_time = auction.bidding_time,
        cooldown_time = auction.cooldown_time,
        "Starting a new auction"
    );
    notifier
        .send(&writer, config.factory, auction.calldata(), None)
        .await?;
    Ok(())
}

pub async fn bid(config: &AuctionConfig, form: &BidForm) -> Result<()> {
    let bid = form.validate()?;
    let (writer, notifier) = signer(config)?;

    let reader = EvmReader::new(&config.chain.rpc_url)?;
    let info = AuctionClient::new(&reader, config.factory)
        .info(bid.auction)
        .await?;
    if bid.value <= info.highest_bid {
        warn!(
            "Offer of {} ETH does not beat the highest bid of {} ETH",
            format_ether(bid.value),
            format_ether(info.highest_bid)
        );
    }

    info!(auction = %bid.auction, offer = %format_ether(bid.value), "Bidding");
    notifier
        .send(&writer, bid.auction, bid.calldata(), Some(bid.value))
        .await?;
    Ok(())
}

pub async fn withdraw(config: &AuctionConfig, auction: Address) -> Result<()> {
    let (writer, notifier) = signer(config)?;

    info!(auction = %auction, "Withdrawing pending returns");
    notifier
        .send(&writer, auction, withdraw_calldata(), None)
        .await?;
    Ok(())
}

pub async fn finalize(config: &AuctionConfig, auction: Address) -> Result<()> {
    let (writer, notifier) = signer(config)?;

    info!(auction = %auction, "Finalizing auction");
    notifier
        .send(&writer, auction, finalize_calldata(), None)
        .await?;
    Ok(())
}
