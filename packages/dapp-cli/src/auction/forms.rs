//! Auction forms

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use clap::Args;
use crosslayer_rs::units::ETHER_DECIMALS;

use super::contracts::{AuctionFactory, PublicAuction};
use crate::forms::{parse_address, parse_positive_amount, FieldError, FormError, Validator};

pub const DEFAULT_BIDDING_TIME: u64 = 86_400;
pub const DEFAULT_COOLDOWN_TIME: u64 = 30;

#[derive(Debug, Clone, Args)]
pub struct AddAuctionForm {
    /// Receives the winning bid (default: the signer)
    #[arg(long)]
    pub beneficiary: Option<String>,

    /// Auction duration in seconds
    #[arg(long, default_value_t = DEFAULT_BIDDING_TIME)]
    pub bidding_time: u64,

    /// Seconds a bidder must wait between bids
    #[arg(long, default_value_t = DEFAULT_COOLDOWN_TIME)]
    pub cooldown_time: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAuction {
    pub beneficiary: Address,
    pub bidding_time: u64,
    pub cooldown_time: u64,
}

impl AddAuctionForm {
    /// `signer` stands in for a missing beneficiary
    pub fn validate(&self, signer: Address) -> Result<NewAuction, FormError> {
        let mut v = Validator::new();
        let beneficiary = match self.beneficiary.as_deref() {
            Some(raw) => v.check(parse_address("beneficiary", raw)),
            None => Some(signer),
        };
        let bidding_time = v.check(if self.bidding_time == 0 {
            Err(FieldError::new("bidding_time", "must be greater than 0"))
        } else {
            Ok(self.bidding_time)
        });

        v.finish(|| {
            Some(NewAuction {
                beneficiary: beneficiary?,
                bidding_time: bidding_time?,
                cooldown_time: self.cooldown_time,
            })
        })
    }
}

impl NewAuction {
    pub fn calldata(&self) -> Bytes {
        AuctionFactory::createAuctionCall {
            _beneficiary: self.beneficiary,
            _biddingTime: U256::from(self.bidding_time),
            _cooldownTime: U256::from(self.cooldown_time),
        }
        .abi_encode()
        .into()
    }
}

#[derive(Debug, Clone, Args)]
pub struct BidForm {
    /// Auction contract address
    #[arg(long)]
    pub auction: String,

    /// Offer in ETH
    #[arg(long)]
    pub offer: String,
}

/// A bid is a payable `bid()` call carrying the offer as value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bid {
    pub auction: Address,
    pub value: U256,
}

impl BidForm {
    pub fn validate(&self) -> Result<Bid, FormError> {
        let mut v = Validator::new();
        let auction = v.check(parse_address("auction", &self.auction));
        let value = v.check(parse_positive_amount("offer", &self.offer, ETHER_DECIMALS));

        v.finish(|| {
            Some(Bid {
                auction: auction?,
                value: value?,
            })
        })
    }
}

impl Bid {
    pub fn calldata(&self) -> Bytes {
        PublicAuction::bidCall {}.abi_encode().into()
    }
}

pub fn withdraw_calldata() -> Bytes {
    PublicAuction::withdrawCall {}.abi_encode().into()
}

pub fn finalize_calldata() -> Bytes {
    PublicAuction::finalizeAuctionCall {}.abi_encode().into()
}
