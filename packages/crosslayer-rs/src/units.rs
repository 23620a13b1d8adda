//! Amount helpers
//!
//! Token amounts arrive from the command line as decimal strings and leave
//! as `U256` base units; fee parameters get bumped by whole percentages.

use alloy::primitives::utils::{format_units, parse_units, ParseUnits, UnitsError};
use alloy::primitives::U256;

/// Decimals used by ether and by the demo ERC-20 tokens
pub const ETHER_DECIMALS: u8 = 18;

/// Increase `value` by `percent` percent (integer arithmetic, rounds down).
///
/// Saturates at `U256::MAX` instead of overflowing.
pub fn percent_increase(value: U256, percent: U256) -> U256 {
    let hundred = U256::from(100u8);
    // value * percent / 100 without forming the full product
    let increase = (value / hundred)
        .saturating_mul(percent)
        .saturating_add((value % hundred).saturating_mul(percent) / hundred);
    value.saturating_add(increase)
}

/// Parse a non-negative decimal amount into base units.
pub fn parse_token_amount(amount: &str, decimals: u8) -> Result<U256, UnitsError> {
    match parse_units(amount.trim(), decimals)? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(UnitsError::InvalidUnit(format!(
            "negative amount: {}",
            amount
        ))),
    }
}

/// Format base units as a decimal string without trailing zeros.
pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    let raw = format_units(amount, decimals).unwrap_or_else(|_| amount.to_string());
    trim_decimal(raw)
}

/// Format wei as ether without trailing zeros.
pub fn format_ether(amount: U256) -> String {
    format_token_amount(amount, ETHER_DECIMALS)
}

fn trim_decimal(raw: String) -> String {
    if !raw.contains('.') {
        return raw;
    }
    raw.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_increase_large_values() {
        // value * 50 overflows U256 but the bumped value does not
        let half = U256::MAX >> 1;
        assert_eq!(
            percent_increase(half, U256::from(50u64)),
            half + (half >> 1)
        );
        assert_eq!(percent_increase(U256::MAX, U256::from(500u64)), U256::MAX);
        assert_eq!(percent_increase(U256::from(3u64), U256::MAX), U256::MAX);
    }

    #[test]
    fn test_percent_increase() {
        assert_eq!(
            percent_increase(U256::from(1000u64), U256::from(30u64)),
            U256::from(1300u64)
        );
        assert_eq!(
            percent_increase(U256::from(1000u64), U256::from(500u64)),
            U256::from(6000u64)
        );
        assert_eq!(
            percent_increase(U256::from(1000u64), U256::ZERO),
            U256::from(1000u64)
        );
        // Rounds down
        assert_eq!(
            percent_increase(U256::from(7u64), U256::from(30u64)),
            U256::from(9u64)
        );
    }

    #[test]
    fn test_parse_token_amount() {
        assert_eq!(
            parse_token_amount("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(parse_token_amount("0", 18).unwrap(), U256::ZERO);
        assert!(parse_token_amount("abc", 18).is_err());
        assert!(parse_token_amount("-1", 18).is_err());
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(U256::from(1_000_000_000_000_000_000u128)), "1");
        assert_eq!(format_ether(U256::from(1_250_000_000_000_000_000u128)), "1.25");
        assert_eq!(format_ether(U256::ZERO), "0");
    }
}
