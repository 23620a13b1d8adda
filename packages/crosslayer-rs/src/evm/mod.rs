//! EVM Chain Support Module
//!
//! ## Submodules
//!
//! - `client` - Read-only and signing clients built on alloy providers
//! - `rpc` - Raw JSON-RPC probe for block header fields
//! - `artifact` - Hardhat artifact and build-info loading
//! - `verify` - Etherscan-compatible source verification
//! - `contracts` - ERC20 bindings shared by the demos

pub mod artifact;
pub mod client;
pub mod contracts;
pub mod rpc;
pub mod verify;

pub use artifact::{BuildInfo, HardhatArtifact};
pub use client::{ensure_success, EvmReader, EvmWriter};
pub use contracts::ERC20;
pub use rpc::{BlockHeader, JsonRpcProbe};
pub use verify::{ExplorerVerifier, VerificationOutcome, VerificationRequest};
