//! Read side of the auction factory and auctions

use alloy::primitives::{Address, U256};
use crosslayer_rs::evm::EvmReader;
use crosslayer_rs::units::format_ether;
use eyre::{Result, WrapErr};

use super::contracts::{AuctionFactory, PublicAuction};
use crate::format_timestamp;

/// State of one `PublicAuction`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionInfo {
    pub address: Address,
    pub beneficiary: Address,
    pub highest_bid: U256,
    pub highest_bidder: Address,
    pub end_time: U256,
    pub cooldown_time: U256,
    pub finalized: bool,
}

impl AuctionInfo {
    /// Lines printed for one auction card
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Auction {}", self.address),
            format!("  Beneficiary: {}", self.beneficiary),
            format!("  Current Highest Bid: {} ETH", format_ether(self.highest_bid)),
            format!("  Bid Cooldown Time: {} seconds", self.cooldown_time),
            format!("  Bid End Time: {}", format_timestamp(self.end_time)),
        ];
        if !self.highest_bidder.is_zero() {
            lines.push(format!("  Highest Bidder: {}", self.highest_bidder));
        }
        if self.finalized {
            lines.push("  Finalized".to_string());
        }
        lines
    }
}

/// Factory order is oldest first; listings show the newest first
pub fn newest_first(mut auctions: Vec<Address>) -> Vec<Address> {
    auctions.reverse();
    auctions
}

pub fn auctions_listing(auctions: &[AuctionInfo]) -> Vec<String> {
    if auctions.is_empty() {
        return vec!["No auction available".to_string()];
    }
    auctions.iter().flat_map(AuctionInfo::display_lines).collect()
}

pub struct AuctionClient<'a> {
    reader: &'a EvmReader,
    factory: Address,
}

impl<'a> AuctionClient<'a> {
    pub fn new(reader: &'a EvmReader, factory: Address) -> Self {
        Self { reader, factory }
    }

    /// Auction addresses in creation order
    pub async fn auctions(&self) -> Result<Vec<Address>> {
        let factory = AuctionFactory::new(self.factory, self.reader.provider());
        Ok(factory
            .getAuctions()
            .call()
            .await
            .wrap_err("Failed to query getAuctions")?
            ._0)
    }

    pub async fn auction_at(&self, index: u64) -> Result<Address> {
        let factory = AuctionFactory::new(self.factory, self.reader.provider());
        Ok(factory
            .auctions(U256::from(index))
            .call()
            .await
            .wrap_err_with(|| format!("Failed to query auction #{}", index))?
            ._0)
    }

    pub async fn info(&self, auction: Address) -> Result<AuctionInfo> {
        let contract = PublicAuction::new(auction, self.reader.provider());
        let context = || format!("Failed to query auction {}", auction);

        Ok(AuctionInfo {
            address: auction,
            beneficiary: contract.beneficiary().call().await.wrap_err_with(context)?._0,
            highest_bid: contract.highestBid().call().await.wrap_err_with(context)?._0,
            highest_bidder: contract.highestBidder().call().await.wrap_err_with(context)?._0,
            end_time: contract.auctionEndTime().call().await.wrap_err_with(context)?._0,
            cooldown_time: contract.cooldownTime().call().await.wrap_err_with(context)?._0,
            finalized: contract.auctionFinalized().call().await.wrap_err_with(context)?._0,
        })
    }

    /// Refundable amount of an outbid bidder
    pub async fn pending_returns(&self, auction: Address, bidder: Address) -> Result<U256> {
        let contract = PublicAuction::new(auction, self.reader.provider());
        Ok(contract
            .pendingReturns(bidder)
            .call()
            .await
            .wrap_err("Failed to query pendingReturns")?
            ._0)
    }

    pub async fn last_bid_time(&self, auction: Address, bidder: Address) -> Result<U256> {
        let contract = PublicAuction::new(auction, self.reader.provider());
        Ok(contract
            .lastBidTime(bidder)
            .call()
            .await
            .wrap_err("Failed to query lastBidTime")?
            ._0)
    }
}
