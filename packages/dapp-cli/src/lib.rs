//! dApp CLI
//!
//! Command line client for two demo dApps on Morph Holesky:
//!
//! - `hotel` - list rooms, book, review, and the owner's room management
//! - `auction` - list auctions, start one, bid, withdraw and finalize
//!
//! Inputs are validated before anything is sent; every write reports its
//! progress through [`notify::Notifier`].

pub mod auction;
pub mod config;
pub mod forms;
pub mod hotel;
pub mod notify;

use alloy::primitives::U256;
use chrono::DateTime;

pub use forms::{FieldError, FormError};

/// Unix timestamp as `2024 Nov 7, 20:30` (UTC)
pub fn format_timestamp(timestamp: U256) -> String {
    u64::try_from(timestamp)
        .ok()
        .and_then(|secs| i64::try_from(secs).ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y %b %-d, %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(U256::from(1_731_011_400u64)), "2024 Nov 7, 20:30");
        assert_eq!(format_timestamp(U256::ZERO), "1970 Jan 1, 00:00");
        assert_eq!(format_timestamp(U256::MAX), U256::MAX.to_string());
    }
}
