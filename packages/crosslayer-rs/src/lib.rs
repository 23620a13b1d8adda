//! Crosslayer-RS: Shared Chain Library for the dApp Demos
//!
//! This crate provides shared functionality for the `retryable-ticket` and
//! `dapp-cli` packages:
//!
//! - **Env** - Required environment variable checks and `.env` loading
//! - **Redact** - Secret redaction for keys in logs and debug output
//! - **Hash** - keccak256 and byte helpers used for retryable ticket ids
//! - **Units** - Token amount parsing/formatting and percentage bumps
//! - **EVM Module** - Read/write clients, Hardhat artifacts, explorer verification
//! - **Arbitrum Module** - L1 -> L2 retryable tickets: networks, aliasing,
//!   fee estimation, message derivation and status tracking
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! crosslayer-rs = { path = "../crosslayer-rs" }
//! ```

pub mod arbitrum;
pub mod env;
pub mod evm;
pub mod hash;
pub mod redact;
pub mod units;

pub use arbitrum::{
    apply_l1_to_l2_alias, calculate_retryable_id, undo_l1_to_l2_alias, ArbitrumNetwork,
    MessageStatus, RetryableFees, RetryableGasEstimator, RetryableGasOverrides,
    RetryableMessage, RetryableRequest, StatusTracker, TrackerError,
};
pub use env::{banner, load_dotenv, require_env_vars, EnvError};
pub use evm::{EvmReader, EvmWriter};
pub use redact::Redacted;
