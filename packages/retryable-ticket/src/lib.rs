//! Retryable Ticket Demo
//!
//! Deploys a pair of contracts on Ethereum Sepolia and Arbitrum Sepolia and
//! updates the L2 contract's state from L1 through a retryable ticket.
//!
//! # Flow
//!
//! 1. `deploy-l1` - deploy and verify `RetryableTicketL1`
//! 2. `deploy-l2` - deploy and verify `RetryableTicketL2` (needs the L1 address)
//! 3. `update-l1` - point the L1 contract at the L2 contract
//! 4. `demo` - send `setValues` from L1 and wait for it to execute on L2

pub mod commands;
pub mod config;
pub mod contracts;
pub mod values;

pub use values::ContractValues;
