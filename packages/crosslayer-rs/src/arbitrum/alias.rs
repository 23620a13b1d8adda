//! L1 -> L2 address aliasing
//!
//! When an L1 contract sends a message to L2, `msg.sender` on L2 is the L1
//! address plus a fixed offset (mod 2^160). L2 contracts that accept calls
//! from an L1 counterpart compare against the aliased address.

use alloy::primitives::{address, Address, U160};

/// Offset added to L1 contract addresses
pub const ALIAS_OFFSET: Address = address!("1111000000000000000000000000000000001111");

/// Address an L1 contract appears as on L2
pub fn apply_l1_to_l2_alias(l1_address: Address) -> Address {
    let value = U160::from_be_bytes(l1_address.0 .0);
    let offset = U160::from_be_bytes(ALIAS_OFFSET.0 .0);
    Address::from(value.wrapping_add(offset).to_be_bytes::<20>())
}

/// Recover the L1 address from an aliased L2 sender
pub fn undo_l1_to_l2_alias(l2_address: Address) -> Address {
    let value = U160::from_be_bytes(l2_address.0 .0);
    let offset = U160::from_be_bytes(ALIAS_OFFSET.0 .0);
    Address::from(value.wrapping_sub(offset).to_be_bytes::<20>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_alias() {
        assert_eq!(
            apply_l1_to_l2_alias(Address::ZERO),
            ALIAS_OFFSET
        );
        assert_eq!(
            apply_l1_to_l2_alias(address!("0000000000000000000000000000000000000001")),
            address!("1111000000000000000000000000000000001112")
        );
    }

    #[test]
    fn test_alias_wraps_around() {
        let l1 = address!("ffffffffffffffffffffffffffffffffffffffff");
        assert_eq!(
            apply_l1_to_l2_alias(l1),
            address!("1111000000000000000000000000000000001110")
        );
        assert_eq!(undo_l1_to_l2_alias(Address::ZERO), address!("eeeeffffffffffffffffffffffffffffffffeeef"));
    }

    #[test]
    fn test_alias_round_trip() {
        let addrs = [
            Address::ZERO,
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            address!("ffffffffffffffffffffffffffffffffffffffff"),
            address!("eeeeffffffffffffffffffffffffffffffffeeef"),
        ];
        for addr in addrs {
            assert_eq!(undo_l1_to_l2_alias(apply_l1_to_l2_alias(addr)), addr);
            assert_eq!(apply_l1_to_l2_alias(undo_l1_to_l2_alias(addr)), addr);
        }
    }
}
