//! Arbitrum network registry
//!
//! Core contract addresses for the public Arbitrum chains. Custom or
//! local chains supply their inbox and bridge through
//! `ARB_INBOX_ADDRESS` / `ARB_BRIDGE_ADDRESS`.

use alloy::primitives::{address, Address};
use thiserror::Error;

use crate::env;

/// Seven days, the lifetime of a retryable ticket on every public chain
pub const DEFAULT_RETRYABLE_LIFETIME_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Env var that overrides the inbox address
pub const INBOX_OVERRIDE_VAR: &str = "ARB_INBOX_ADDRESS";

/// Env var that overrides the bridge address
pub const BRIDGE_OVERRIDE_VAR: &str = "ARB_BRIDGE_ADDRESS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Unrecognized Arbitrum network {chain_id}; set {INBOX_OVERRIDE_VAR} and {BRIDGE_OVERRIDE_VAR}")]
    Unknown { chain_id: u64 },

    #[error("Invalid address in {name}: {value}")]
    InvalidAddress { name: String, value: String },
}

/// An Arbitrum child chain and the parent-chain contracts that feed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbitrumNetwork {
    pub chain_id: u64,
    pub name: String,
    pub parent_chain_id: u64,
    /// Inbox on the parent chain; retryables are submitted here
    pub inbox: Address,
    /// Bridge on the parent chain; emits `MessageDelivered`
    pub bridge: Address,
    pub retryable_lifetime_seconds: u64,
}

impl ArbitrumNetwork {
    pub fn arbitrum_one() -> Self {
        Self {
            chain_id: 42161,
            name: "Arbitrum One".to_string(),
            parent_chain_id: 1,
            inbox: address!("4Dbd4fc535Ac27206064B68FfCf827b0A60BAB3f"),
            bridge: address!("8315177aB297bA92A06054cE80a67Ed4DBd7ed3a"),
            retryable_lifetime_seconds: DEFAULT_RETRYABLE_LIFETIME_SECONDS,
        }
    }

    pub fn arbitrum_nova() -> Self {
        Self {
            chain_id: 42170,
            name: "Arbitrum Nova".to_string(),
            parent_chain_id: 1,
            inbox: address!("c4448b71118c9071Bcb9734A0EAc55D18A153949"),
            bridge: address!("C1Ebd02f738644983b6C4B2d440b8e77DdE276Bd"),
            retryable_lifetime_seconds: DEFAULT_RETRYABLE_LIFETIME_SECONDS,
        }
    }

    pub fn arbitrum_sepolia() -> Self {
        Self {
            chain_id: 421614,
            name: "Arbitrum Sepolia".to_string(),
            parent_chain_id: 11155111,
            inbox: address!("aAe29B0366299461418F5324a79Afc425BE5ae21"),
            bridge: address!("38f918D0E9F1b721EDaA41302E399fa1B79333a9"),
            retryable_lifetime_seconds: DEFAULT_RETRYABLE_LIFETIME_SECONDS,
        }
    }

    /// Look up a registered network by child chain id
    pub fn from_chain_id(chain_id: u64) -> Result<Self, NetworkError> {
        [
            Self::arbitrum_one(),
            Self::arbitrum_nova(),
            Self::arbitrum_sepolia(),
        ]
        .into_iter()
        .find(|n| n.chain_id == chain_id)
        .ok_or(NetworkError::Unknown { chain_id })
    }

    /// Resolve a network, applying `ARB_INBOX_ADDRESS` / `ARB_BRIDGE_ADDRESS`.
    ///
    /// An unregistered chain id is accepted only when both overrides are set.
    pub fn with_overrides(chain_id: u64) -> Result<Self, NetworkError> {
        let inbox = override_address(INBOX_OVERRIDE_VAR)?;
        let bridge = override_address(BRIDGE_OVERRIDE_VAR)?;

        match (Self::from_chain_id(chain_id), inbox, bridge) {
            (Ok(mut network), inbox, bridge) => {
                if let Some(inbox) = inbox {
                    network.inbox = inbox;
                }
                if let Some(bridge) = bridge {
                    network.bridge = bridge;
                }
                Ok(network)
            }
            (Err(_), Some(inbox), Some(bridge)) => Ok(Self {
                chain_id,
                name: format!("Custom Arbitrum chain {}", chain_id),
                parent_chain_id: 0,
                inbox,
                bridge,
                retryable_lifetime_seconds: DEFAULT_RETRYABLE_LIFETIME_SECONDS,
            }),
            (Err(e), _, _) => Err(e),
        }
    }
}

fn override_address(name: &str) -> Result<Option<Address>, NetworkError> {
    env::optional(name)
        .map(|value| {
            value.trim().parse().map_err(|_| NetworkError::InvalidAddress {
                name: name.to_string(),
                value,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_overrides() {
        std::env::remove_var(INBOX_OVERRIDE_VAR);
        std::env::remove_var(BRIDGE_OVERRIDE_VAR);
    }

    #[test]
    fn test_registered_networks() {
        let sepolia = ArbitrumNetwork::from_chain_id(421614).unwrap();
        assert_eq!(sepolia.parent_chain_id, 11155111);
        assert_eq!(
            sepolia.inbox,
            address!("aAe29B0366299461418F5324a79Afc425BE5ae21")
        );
        assert_eq!(sepolia.retryable_lifetime_seconds, 604800);

        assert_eq!(ArbitrumNetwork::from_chain_id(42161).unwrap().name, "Arbitrum One");
        assert_eq!(ArbitrumNetwork::from_chain_id(42170).unwrap().name, "Arbitrum Nova");
    }

    #[test]
    fn test_unknown_network() {
        assert_eq!(
            ArbitrumNetwork::from_chain_id(31337),
            Err(NetworkError::Unknown { chain_id: 31337 })
        );
    }

    #[test]
    #[serial]
    fn test_overrides_replace_registered_addresses() {
        clear_overrides();
        std::env::set_var(INBOX_OVERRIDE_VAR, "0x0000000000000000000000000000000000000001");

        let network = ArbitrumNetwork::with_overrides(421614).unwrap();
        assert_eq!(network.inbox, Address::with_last_byte(1));
        assert_eq!(network.bridge, ArbitrumNetwork::arbitrum_sepolia().bridge);

        clear_overrides();
    }

    #[test]
    #[serial]
    fn test_custom_network_needs_both_overrides() {
        clear_overrides();
        std::env::set_var(INBOX_OVERRIDE_VAR, "0x0000000000000000000000000000000000000001");
        assert!(ArbitrumNetwork::with_overrides(412346).is_err());

        std::env::set_var(BRIDGE_OVERRIDE_VAR, "0x0000000000000000000000000000000000000002");
        let network = ArbitrumNetwork::with_overrides(412346).unwrap();
        assert_eq!(network.chain_id, 412346);
        assert_eq!(network.bridge, Address::with_last_byte(2));

        clear_overrides();
    }

    #[test]
    #[serial]
    fn test_invalid_override() {
        clear_overrides();
        std::env::set_var(BRIDGE_OVERRIDE_VAR, "not-an-address");
        assert!(matches!(
            ArbitrumNetwork::with_overrides(421614),
            Err(NetworkError::InvalidAddress { .. })
        ));
        clear_overrides();
    }
}
