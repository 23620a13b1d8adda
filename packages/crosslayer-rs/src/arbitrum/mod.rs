//! Arbitrum L1 -> L2 Retryable Tickets
//!
//! ## Submodules
//!
//! - `network` - Inbox/bridge addresses of the public Arbitrum chains
//! - `alias` - L1 -> L2 sender aliasing
//! - `contracts` - NodeInterface, Inbox, Bridge and ArbRetryableTx bindings
//! - `gas` - Fee estimation for a retryable submission
//! - `message` - Retryable derivation from L1 receipt logs
//! - `status` - Polling a retryable until it settles on L2

pub mod alias;
pub mod contracts;
pub mod gas;
pub mod message;
pub mod network;
pub mod status;

pub use alias::{apply_l1_to_l2_alias, undo_l1_to_l2_alias};
pub use gas::{
    finalize_fees, GasLimitOverride, PercentIncreaseOverride, RetryableFees,
    RetryableGasEstimator, RetryableGasOverrides, RetryableRequest,
};
pub use message::{
    calculate_retryable_id, retryable_messages, retryable_messages_from_receipt, MessageError,
    RetryableMessage, SubmitRetryableData,
};
pub use network::{ArbitrumNetwork, NetworkError};
pub use status::{
    L2StatusSource, MessageStatus, ProviderStatusSource, ReceiptSummary, StatusTracker,
    TrackerError,
};
