//! Retryable ticket command configuration
//!
//! Each command has its own set of required variables, checked before any
//! RPC connection is made. Secrets are held in [`Redacted`] so the
//! configuration can be logged with `{:?}`.

use alloy::primitives::Address;
use crosslayer_rs::env::{self, require_env_vars, EnvError};
use crosslayer_rs::Redacted;
use std::path::PathBuf;

pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const L1_SEPOLIA_RPC: &str = "L1_SEPOLIA_RPC";
pub const L2_ARB_SEPOLIA_RPC: &str = "L2_ARB_SEPOLIA_RPC";
pub const L1_SEPOLIA_ETHERSCAN_KEY: &str = "L1_SEPOLIA_ETHERSCAN_KEY";
pub const L2_ARB_SEPOLIA_ETHERSCAN_KEY: &str = "L2_ARB_SEPOLIA_ETHERSCAN_KEY";
pub const L1_CONTRACT_ADDRESS: &str = "L1_CONTRACT_ADDRESS";
pub const L2_CONTRACT_ADDRESS: &str = "L2_CONTRACT_ADDRESS";

/// Optional: Hardhat artifacts directory (default `artifacts`)
pub const ARTIFACTS_DIR: &str = "ARTIFACTS_DIR";
/// Optional: explorer API for L1 verification
pub const L1_EXPLORER_API_URL: &str = "L1_EXPLORER_API_URL";
/// Optional: explorer API for L2 verification
pub const L2_EXPLORER_API_URL: &str = "L2_EXPLORER_API_URL";

pub const DEPLOY_L1_VARS: &[&str] = &[
    PRIVATE_KEY,
    L1_SEPOLIA_RPC,
    L2_ARB_SEPOLIA_RPC,
    L1_SEPOLIA_ETHERSCAN_KEY,
];

pub const DEPLOY_L2_VARS: &[&str] = &[
    PRIVATE_KEY,
    L1_CONTRACT_ADDRESS,
    L2_ARB_SEPOLIA_RPC,
    L2_ARB_SEPOLIA_ETHERSCAN_KEY,
];

pub const UPDATE_L1_VARS: &[&str] = &[
    PRIVATE_KEY,
    L1_SEPOLIA_RPC,
    L1_SEPOLIA_ETHERSCAN_KEY,
    L1_CONTRACT_ADDRESS,
    L2_CONTRACT_ADDRESS,
];

/// Shared by `show` and `demo`
pub const BOTH_CHAINS_VARS: &[&str] = &[
    PRIVATE_KEY,
    L1_SEPOLIA_RPC,
    L2_ARB_SEPOLIA_RPC,
    L1_CONTRACT_ADDRESS,
    L2_CONTRACT_ADDRESS,
];

fn address(name: &str) -> Result<Address, EnvError> {
    let raw = env::required(name)?;
    raw.parse().map_err(|e| EnvError::Invalid {
        name: name.to_string(),
        reason: format!("{}", e),
    })
}

fn secret(name: &str) -> Result<Redacted<String>, EnvError> {
    env::required(name).map(Redacted)
}

fn artifacts_dir() -> PathBuf {
    env::optional(ARTIFACTS_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"))
}

/// `deploy-l1`
#[derive(Debug, Clone)]
pub struct DeployL1Config {
    pub private_key: Redacted<String>,
    pub l1_rpc_url: String,
    pub l2_rpc_url: String,
    pub l1_explorer_key: Redacted<String>,
    pub l1_explorer_api: Option<String>,
    pub artifacts_dir: PathBuf,
}

impl DeployL1Config {
    pub fn load() -> Result<Self, EnvError> {
        require_env_vars(DEPLOY_L1_VARS)?;

        Ok(Self {
            private_key: secret(PRIVATE_KEY)?,
            l1_rpc_url: env::required(L1_SEPOLIA_RPC)?,
            l2_rpc_url: env::required(L2_ARB_SEPOLIA_RPC)?,
            l1_explorer_key: secret(L1_SEPOLIA_ETHERSCAN_KEY)?,
            l1_explorer_api: env::optional(L1_EXPLORER_API_URL),
            artifacts_dir: artifacts_dir(),
        })
    }
}

/// `deploy-l2`
#[derive(Debug, Clone)]
pub struct DeployL2Config {
    pub private_key: Redacted<String>,
    pub l1_contract: Address,
    pub l2_rpc_url: String,
    pub l2_explorer_key: Redacted<String>,
    pub l2_explorer_api: Option<String>,
    pub artifacts_dir: PathBuf,
}

impl DeployL2Config {
    pub fn load() -> Result<Self, EnvError> {
        require_env_vars(DEPLOY_L2_VARS)?;

        Ok(Self {
            private_key: secret(PRIVATE_KEY)?,
            l1_contract: address(L1_CONTRACT_ADDRESS)?,
            l2_rpc_url: env::required(L2_ARB_SEPOLIA_RPC)?,
            l2_explorer_key: secret(L2_ARB_SEPOLIA_ETHERSCAN_KEY)?,
            l2_explorer_api: env::optional(L2_EXPLORER_API_URL),
            artifacts_dir: artifacts_dir(),
        })
    }
}

/// `update-l1`
#[derive(Debug, Clone)]
pub struct UpdateL1Config {
    pub private_key: Redacted<String>,
    pub l1_rpc_url: String,
    pub l1_contract: Address,
    pub l2_contract: Address,
}

impl UpdateL1Config {
    pub fn load() -> Result<Self, EnvError> {
        require_env_vars(UPDATE_L1_VARS)?;

        Ok(Self {
            private_key: secret(PRIVATE_KEY)?,
            l1_rpc_url: env::required(L1_SEPOLIA_RPC)?,
            l1_contract: address(L1_CONTRACT_ADDRESS)?,
            l2_contract: address(L2_CONTRACT_ADDRESS)?,
        })
    }
}

/// `show` and `demo`
#[derive(Debug, Clone)]
pub struct BothChainsConfig {
    pub private_key: Redacted<String>,
    pub l1_rpc_url: String,
    pub l2_rpc_url: String,
    pub l1_contract: Address,
    pub l2_contract: Address,
}

impl BothChainsConfig {
    pub fn load() -> Result<Self, EnvError> {
        require_env_vars(BOTH_CHAINS_VARS)?;

        Ok(Self {
            private_key: secret(PRIVATE_KEY)?,
            l1_rpc_url: env::required(L1_SEPOLIA_RPC)?,
            l2_rpc_url: env::required(L2_ARB_SEPOLIA_RPC)?,
            l1_contract: address(L1_CONTRACT_ADDRESS)?,
            l2_contract: address(L2_CONTRACT_ADDRESS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: &[&str] = &[
        PRIVATE_KEY,
        L1_SEPOLIA_RPC,
        L2_ARB_SEPOLIA_RPC,
        L1_SEPOLIA_ETHERSCAN_KEY,
        L2_ARB_SEPOLIA_ETHERSCAN_KEY,
        L1_CONTRACT_ADDRESS,
        L2_CONTRACT_ADDRESS,
        ARTIFACTS_DIR,
        L1_EXPLORER_API_URL,
        L2_EXPLORER_API_URL,
    ];

    fn clear() {
        for name in ALL_VARS {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_deploy_l1_reports_all_missing() {
        clear();
        std::env::set_var(PRIVATE_KEY, "0xabc");

        let err = DeployL1Config::load().unwrap_err();
        assert_eq!(
            err,
            EnvError::Missing {
                names: vec![
                    L1_SEPOLIA_RPC.to_string(),
                    L2_ARB_SEPOLIA_RPC.to_string(),
                    L1_SEPOLIA_ETHERSCAN_KEY.to_string(),
                ]
            }
        );
        clear();
    }

    #[test]
    #[serial]
    fn test_update_l1_requires_explorer_key() {
        clear();
        std::env::set_var(PRIVATE_KEY, "0xabc");
        std::env::set_var(L1_SEPOLIA_RPC, "http://localhost:8545");
        std::env::set_var(L1_CONTRACT_ADDRESS, "0x1111111111111111111111111111111111111111");
        std::env::set_var(L2_CONTRACT_ADDRESS, "0x2222222222222222222222222222222222222222");

        assert_eq!(
            UpdateL1Config::load().unwrap_err(),
            EnvError::Missing {
                names: vec![L1_SEPOLIA_ETHERSCAN_KEY.to_string()]
            }
        );
        clear();
    }

    #[test]
    #[serial]
    fn test_both_chains_config_loads_and_redacts() {
        clear();
        std::env::set_var(PRIVATE_KEY, "0xsecretkey");
        std::env::set_var(L1_SEPOLIA_RPC, "http://localhost:8545");
        std::env::set_var(L2_ARB_SEPOLIA_RPC, "http://localhost:8547");
        std::env::set_var(L1_CONTRACT_ADDRESS, "0x1111111111111111111111111111111111111111");
        std::env::set_var(L2_CONTRACT_ADDRESS, "0x2222222222222222222222222222222222222222");

        let config = BothChainsConfig::load().unwrap();
        assert_eq!(config.l1_contract, Address::repeat_byte(0x11));
        assert_eq!(config.l2_contract, Address::repeat_byte(0x22));
        assert_eq!(config.private_key.expose(), "0xsecretkey");

        let debug = format!("{:?}", config);
        assert!(!debug.contains("secretkey"));
        assert!(debug.contains("<redacted>"));
        clear();
    }

    #[test]
    #[serial]
    fn test_invalid_contract_address() {
        clear();
        std::env::set_var(PRIVATE_KEY, "0xabc");
        std::env::set_var(L1_CONTRACT_ADDRESS, "0x1234");
        std::env::set_var(L2_ARB_SEPOLIA_RPC, "http://localhost:8547");
        std::env::set_var(L2_ARB_SEPOLIA_ETHERSCAN_KEY, "key");

        assert!(matches!(
            DeployL2Config::load(),
            Err(EnvError::Invalid { ref name, .. }) if name == L1_CONTRACT_ADDRESS
        ));
        clear();
    }

    #[test]
    #[serial]
    fn test_artifacts_dir_default_and_override() {
        clear();
        assert_eq!(artifacts_dir(), PathBuf::from("artifacts"));
        std::env::set_var(ARTIFACTS_DIR, "/tmp/build/artifacts");
        assert_eq!(artifacts_dir(), PathBuf::from("/tmp/build/artifacts"));
        clear();
    }
}
