//! Hashing and byte helpers
//!
//! Used when deriving retryable ticket ids from L1 receipts.

use alloy::primitives::U256;
use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Big-endian bytes of `value` with leading zeros stripped.
///
/// Zero encodes as an empty slice, which is how RLP represents integers.
pub fn trimmed_be_bytes(value: U256) -> Vec<u8> {
    let bytes: [u8; 32] = value.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(32);
    bytes[first..].to_vec()
}

/// Left-pad a big-endian number to 32 bytes.
pub fn pad32(value: U256) -> [u8; 32] {
    value.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        // keccak256("") is a well-known constant
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_matches_alloy() {
        let data = b"MessageDelivered(uint256,bytes32,address,uint8,address,bytes32,uint256,uint64)";
        assert_eq!(keccak256(data), alloy::primitives::keccak256(data).0);
    }

    #[test]
    fn test_trimmed_be_bytes() {
        assert!(trimmed_be_bytes(U256::ZERO).is_empty());
        assert_eq!(trimmed_be_bytes(U256::from(1u8)), vec![0x01]);
        assert_eq!(trimmed_be_bytes(U256::from(0x0100u16)), vec![0x01, 0x00]);
        assert_eq!(trimmed_be_bytes(U256::from(421614u64)), vec![0x06, 0x6e, 0xee]);
    }

    #[test]
    fn test_pad32() {
        let padded = pad32(U256::from(5u8));
        assert_eq!(padded[31], 5);
        assert!(padded[..31].iter().all(|b| *b == 0));
    }
}
