//! dApp client configuration
//!
//! Both demos talk to the Morph Holesky testnet by default. Contract
//! addresses of the deployed hotel contracts are built in and can be
//! overridden; the auction factory has no public deployment and must be set.

use alloy::primitives::{address, Address};
use crosslayer_rs::env::{self, require_env_vars, EnvError};
use crosslayer_rs::Redacted;

pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const RPC_URL: &str = "DAPP_RPC_URL";
pub const EXPLORER_URL: &str = "EXPLORER_URL";
pub const HOTEL_BOOKING_ADDRESS: &str = "HOTEL_BOOKING_ADDRESS";
pub const HOTEL_TOKEN_ADDRESS: &str = "HOTEL_TOKEN_ADDRESS";
pub const AUCTION_FACTORY_ADDRESS: &str = "AUCTION_FACTORY_ADDRESS";

pub const DEFAULT_RPC_URL: &str = "https://rpc-quicknode-holesky.morphl2.io";
pub const DEFAULT_EXPLORER_URL: &str = "https://explorer-holesky.morphl2.io";
pub const DEFAULT_BOOKING_ADDRESS: Address = address!("0B3C2f534D33d16B7B0e89056ECb46C1cA966369");
pub const DEFAULT_TOKEN_ADDRESS: Address = address!("2FdA6C948f815Cf9D2492B60D69f1F9FBFAF0EF2");
/// Account that deployed the hotel contract
pub const HOTEL_ADMIN_ADDRESS: Address = address!("41F669e9c3dCDBf71d2C60843BfDC47bCE257081");

/// Settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub explorer_url: String,
    private_key: Option<Redacted<String>>,
}

impl ChainConfig {
    pub fn load() -> Result<Self, EnvError> {
        Ok(Self {
            rpc_url: env::optional(RPC_URL).unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            explorer_url: env::optional(EXPLORER_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string()),
            private_key: env::optional(PRIVATE_KEY).map(Redacted),
        })
    }

    /// Key for write commands; listing works without one
    pub fn private_key(&self) -> Result<&Redacted<String>, EnvError> {
        self.private_key.as_ref().ok_or_else(|| EnvError::Missing {
            names: vec![PRIVATE_KEY.to_string()],
        })
    }
}

#[derive(Debug, Clone)]
pub struct HotelConfig {
    pub chain: ChainConfig,
    pub booking: Address,
    pub token: Address,
}

impl HotelConfig {
    pub fn load() -> Result<Self, EnvError> {
        Ok(Self {
            chain: ChainConfig::load()?,
            booking: env::parse_or(HOTEL_BOOKING_ADDRESS, DEFAULT_BOOKING_ADDRESS)?,
            token: env::parse_or(HOTEL_TOKEN_ADDRESS, DEFAULT_TOKEN_ADDRESS)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AuctionConfig {
    pub chain: ChainConfig,
    pub factory: Address,
}

impl AuctionConfig {
    pub fn load() -> Result<Self, EnvError> {
        require_env_vars(&[AUCTION_FACTORY_ADDRESS])?;

        Ok(Self {
            chain: ChainConfig::load()?,
            factory: env::parse_or(AUCTION_FACTORY_ADDRESS, Address::ZERO)?,
        })
    }
}
