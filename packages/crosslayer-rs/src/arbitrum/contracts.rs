//! Arbitrum system contract bindings
//!
//! Only the functions and events used for retryable tickets are declared.

use alloy::primitives::{address, Address};
use alloy::sol;

/// NodeInterface precompile, only reachable through `eth_call` / `eth_estimateGas`
pub const NODE_INTERFACE_ADDRESS: Address = address!("00000000000000000000000000000000000000C8");

/// ArbRetryableTx precompile
pub const ARB_RETRYABLE_TX_ADDRESS: Address = address!("000000000000000000000000000000000000006E");

/// Inbox message kind for a submitted retryable
pub const L1_MESSAGE_TYPE_SUBMIT_RETRYABLE_TX: u8 = 9;

/// EIP-2718 type byte of an `ArbitrumSubmitRetryableTx`
pub const ARBITRUM_SUBMIT_RETRY_TX_TYPE: u8 = 0x69;

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract NodeInterface {
        function estimateRetryableTicket(
            address sender,
            uint256 deposit,
            address to,
            uint256 l2CallValue,
            address excessFeeRefundAddress,
            address callValueRefundAddress,
            bytes calldata data
        ) external;
    }
}

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract IInbox {
        function calculateRetryableSubmissionFee(uint256 dataLength, uint256 baseFee)
            external
            view
            returns (uint256);

        event InboxMessageDelivered(uint256 indexed messageNum, bytes data);
    }
}

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract IBridge {
        event MessageDelivered(
            uint256 indexed messageIndex,
            bytes32 indexed beforeInboxAcc,
            address inbox,
            uint8 kind,
            address sender,
            bytes32 messageDataHash,
            uint256 baseFeeL1,
            uint64 timestamp
        );
    }
}

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract ArbRetryableTx {
        function getTimeout(bytes32 ticketId) external view returns (uint256);

        error NoTicketWithID();

        event RedeemScheduled(
            bytes32 indexed ticketId,
            bytes32 indexed retryTxHash,
            uint64 indexed sequenceNum,
            uint64 donatedGas,
            address gasDonor,
            uint256 maxRefund,
            uint256 submissionFeeRefund
        );
    }
}
