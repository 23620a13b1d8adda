//! Retryable message derivation from L1 receipts
//!
//! Submitting a retryable makes the Bridge emit `MessageDelivered` and the
//! Inbox emit `InboxMessageDelivered` with the same message number. The
//! first carries the sender and L1 base fee, the second the
//! submit-retryable payload. Together they determine the retryable
//! creation id, which is the hash of the L2 transaction that creates the
//! ticket.

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::rpc::types::{Log, TransactionReceipt};
use alloy::sol_types::SolEvent;
use alloy_rlp::{Encodable, Header};
use thiserror::Error;
use tracing::debug;

use crate::arbitrum::contracts::{
    IBridge, IInbox, ARBITRUM_SUBMIT_RETRY_TX_TYPE, L1_MESSAGE_TYPE_SUBMIT_RETRYABLE_TX,
};
use crate::arbitrum::network::ArbitrumNetwork;
use crate::hash::{keccak256, pad32, trimmed_be_bytes};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("Submit-retryable data too short: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("No InboxMessageDelivered event for message {0}")]
    MissingInboxMessage(U256),
}

// =============================================================================
// Event Types
// =============================================================================

/// Bridge `MessageDelivered` event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDeliveredEvent {
    pub message_index: U256,
    pub before_inbox_acc: B256,
    pub inbox: Address,
    pub kind: u8,
    /// Already aliased when the submitter is a contract
    pub sender: Address,
    pub message_data_hash: B256,
    pub base_fee_l1: U256,
    pub timestamp: u64,
}

/// Inbox `InboxMessageDelivered` event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxMessageDeliveredEvent {
    pub message_num: U256,
    pub data: Bytes,
}

/// Decoded submit-retryable message payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRetryableData {
    pub dest_address: Address,
    pub l2_call_value: U256,
    /// ETH deposited with the L1 transaction
    pub l1_value: U256,
    pub max_submission_fee: U256,
    pub excess_fee_refund_address: Address,
    pub call_value_refund_address: Address,
    pub gas_limit: U256,
    pub max_fee_per_gas: U256,
    pub data: Bytes,
}

/// A retryable ticket created by an L1 transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryableMessage {
    pub chain_id: u64,
    pub message_number: U256,
    pub sender: Address,
    pub l1_base_fee: U256,
    pub params: SubmitRetryableData,
    /// Hash of the L2 transaction that creates the ticket (the ticket id)
    pub retryable_creation_id: B256,
}

// =============================================================================
// Payload Decoding
// =============================================================================

const WORD: usize = 32;
const HEADER_WORDS: usize = 9;

fn word(data: &[u8], index: usize) -> &[u8] {
    &data[index * WORD..(index + 1) * WORD]
}

fn word_address(data: &[u8], index: usize) -> Address {
    Address::from_slice(&word(data, index)[12..])
}

fn word_u256(data: &[u8], index: usize) -> U256 {
    U256::from_be_slice(word(data, index))
}

impl SubmitRetryableData {
    /// Decode the inbox payload: nine 32-byte words followed by the call data.
    ///
    /// ```text
    /// [0] dest  [1] l2CallValue  [2] l1Value  [3] maxSubmissionFee
    /// [4] excessFeeRefundAddress  [5] callValueRefundAddress
    /// [6] gasLimit  [7] maxFeePerGas  [8] callDataLength  [9..] callData
    /// ```
    pub fn decode(payload: &[u8]) -> Result<Self, MessageError> {
        let header_len = HEADER_WORDS * WORD;
        if payload.len() < header_len {
            return Err(MessageError::Truncated {
                expected: header_len,
                actual: payload.len(),
            });
        }

        let data_length = word_u256(payload, 8);
        let expected = usize::try_from(data_length)
            .ok()
            .and_then(|len| len.checked_add(header_len))
            .ok_or(MessageError::Truncated {
                expected: usize::MAX,
                actual: payload.len(),
            })?;
        if payload.len() < expected {
            return Err(MessageError::Truncated {
                expected,
                actual: payload.len(),
            });
        }

        Ok(Self {
            dest_address: word_address(payload, 0),
            l2_call_value: word_u256(payload, 1),
            l1_value: word_u256(payload, 2),
            max_submission_fee: word_u256(payload, 3),
            excess_fee_refund_address: word_address(payload, 4),
            call_value_refund_address: word_address(payload, 5),
            gas_limit: word_u256(payload, 6),
            max_fee_per_gas: word_u256(payload, 7),
            data: Bytes::copy_from_slice(&payload[header_len..expected]),
        })
    }
}

// =============================================================================
// Log Parsing Functions
// =============================================================================

/// Parse a Bridge `MessageDelivered` log
///
/// Data layout (6 non-indexed fields):
///   [0..32]    inbox           (address)
///   [32..64]   kind            (uint8)
///   [64..96]   sender          (address)
///   [96..128]  messageDataHash (bytes32)
///   [128..160] baseFeeL1       (uint256)
///   [160..192] timestamp       (uint64)
pub fn parse_message_delivered_log(log: &Log) -> Option<MessageDeliveredEvent> {
    let topics = log.topics();
    if topics.len() < 3 || topics[0] != IBridge::MessageDelivered::SIGNATURE_HASH {
        return None;
    }

    let data = log.data().data.as_ref();
    if data.len() < 6 * WORD {
        return None;
    }

    Some(MessageDeliveredEvent {
        message_index: U256::from_be_bytes(topics[1].0),
        before_inbox_acc: topics[2],
        inbox: word_address(data, 0),
        kind: data[2 * WORD - 1],
        sender: word_address(data, 2),
        message_data_hash: B256::from_slice(word(data, 3)),
        base_fee_l1: word_u256(data, 4),
        timestamp: u64::from_be_bytes(data[6 * WORD - 8..6 * WORD].try_into().ok()?),
    })
}

/// Parse an Inbox `InboxMessageDelivered` log
///
/// Data is a single ABI `bytes`: offset word, length word, then the payload.
pub fn parse_inbox_message_log(log: &Log) -> Option<InboxMessageDeliveredEvent> {
    let topics = log.topics();
    if topics.len() < 2 || topics[0] != IInbox::InboxMessageDelivered::SIGNATURE_HASH {
        return None;
    }

    let data = log.data().data.as_ref();
    if data.len() < 2 * WORD {
        return None;
    }

    let offset = usize::try_from(U256::from_be_slice(&data[..WORD])).ok()?;
    let len_end = offset.checked_add(WORD)?;
    if data.len() < len_end {
        return None;
    }
    let len = usize::try_from(U256::from_be_slice(&data[offset..len_end])).ok()?;
    let end = len_end.checked_add(len)?;
    if data.len() < end {
        return None;
    }

    Some(InboxMessageDeliveredEvent {
        message_num: U256::from_be_bytes(topics[1].0),
        data: Bytes::copy_from_slice(&data[len_end..end]),
    })
}

// =============================================================================
// Retryable Id
// =============================================================================

/// RLP payload hashed into the retryable creation id
fn retryable_tx_encoding(
    chain_id: u64,
    sender: Address,
    message_number: U256,
    l1_base_fee: U256,
    params: &SubmitRetryableData,
) -> Vec<u8> {
    let dest = if params.dest_address == Address::ZERO {
        Vec::new()
    } else {
        params.dest_address.to_vec()
    };

    let fields: Vec<Vec<u8>> = vec![
        trimmed_be_bytes(U256::from(chain_id)),
        pad32(message_number).to_vec(),
        sender.to_vec(),
        trimmed_be_bytes(l1_base_fee),
        trimmed_be_bytes(params.l1_value),
        trimmed_be_bytes(params.max_fee_per_gas),
        trimmed_be_bytes(params.gas_limit),
        dest,
        trimmed_be_bytes(params.l2_call_value),
        params.call_value_refund_address.to_vec(),
        trimmed_be_bytes(params.max_submission_fee),
        params.excess_fee_refund_address.to_vec(),
        params.data.to_vec(),
    ];

    let payload_length: usize = fields.iter().map(|f| f.as_slice().length()).sum();
    let mut out = vec![ARBITRUM_SUBMIT_RETRY_TX_TYPE];
    Header {
        list: true,
        payload_length,
    }
    .encode(&mut out);
    for field in &fields {
        field.as_slice().encode(&mut out);
    }
    out
}

/// Compute the id of the L2 transaction that creates a retryable ticket
pub fn calculate_retryable_id(
    chain_id: u64,
    sender: Address,
    message_number: U256,
    l1_base_fee: U256,
    params: &SubmitRetryableData,
) -> B256 {
    B256::from(keccak256(&retryable_tx_encoding(
        chain_id,
        sender,
        message_number,
        l1_base_fee,
        params,
    )))
}

/// Retryables created by a set of L1 logs.
///
/// Only `MessageDelivered` events of kind 9 from the network's inbox are
/// considered; each must have a matching `InboxMessageDelivered`.
pub fn retryable_messages(
    logs: &[Log],
    network: &ArbitrumNetwork,
) -> Result<Vec<RetryableMessage>, MessageError> {
    let inbox_messages: Vec<InboxMessageDeliveredEvent> =
        logs.iter().filter_map(parse_inbox_message_log).collect();

    let mut messages = Vec::new();
    for delivered in logs.iter().filter_map(parse_message_delivered_log) {
        if delivered.kind != L1_MESSAGE_TYPE_SUBMIT_RETRYABLE_TX || delivered.inbox != network.inbox
        {
            continue;
        }

        let inbox_message = inbox_messages
            .iter()
            .find(|m| m.message_num == delivered.message_index)
            .ok_or(MessageError::MissingInboxMessage(delivered.message_index))?;

        let params = SubmitRetryableData::decode(&inbox_message.data)?;
        let retryable_creation_id = calculate_retryable_id(
            network.chain_id,
            delivered.sender,
            delivered.message_index,
            delivered.base_fee_l1,
            &params,
        );

        debug!(
            message_number = %delivered.message_index,
            ticket_id = %retryable_creation_id,
            "Derived retryable message"
        );

        messages.push(RetryableMessage {
            chain_id: network.chain_id,
            message_number: delivered.message_index,
            sender: delivered.sender,
            l1_base_fee: delivered.base_fee_l1,
            params,
            retryable_creation_id,
        });
    }

    Ok(messages)
}

/// Retryables created by an L1 transaction
pub fn retryable_messages_from_receipt(
    receipt: &TransactionReceipt,
    network: &ArbitrumNetwork,
) -> Result<Vec<RetryableMessage>, MessageError> {
    retryable_messages(receipt.inner.logs(), network)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloy::primitives::{address, LogData};

    pub(crate) fn sample_params() -> SubmitRetryableData {
        SubmitRetryableData {
            dest_address: address!("2222222222222222222222222222222222222222"),
            l2_call_value: U256::ZERO,
            l1_value: U256::from(1_000_000_000_000_000u64),
            max_submission_fee: U256::from(123_456u64),
            excess_fee_refund_address: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            call_value_refund_address: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            gas_limit: U256::from(100_000u64),
            max_fee_per_gas: U256::from(600_000_000u64),
            data: Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
        }
    }

    fn encode_payload(p: &SubmitRetryableData) -> Vec<u8> {
        let mut out = Vec::new();
        let addr_word = |a: Address| {
            let mut w = [0u8; 32];
            w[12..].copy_from_slice(a.as_slice());
            w
        };
        out.extend_from_slice(&addr_word(p.dest_address));
        out.extend_from_slice(&pad32(p.l2_call_value));
        out.extend_from_slice(&pad32(p.l1_value));
        out.extend_from_slice(&pad32(p.max_submission_fee));
        out.extend_from_slice(&addr_word(p.excess_fee_refund_address));
        out.extend_from_slice(&addr_word(p.call_value_refund_address));
        out.extend_from_slice(&pad32(p.gas_limit));
        out.extend_from_slice(&pad32(p.max_fee_per_gas));
        out.extend_from_slice(&pad32(U256::from(p.data.len())));
        out.extend_from_slice(&p.data);
        out
    }

    fn log(address: Address, topics: Vec<B256>, data: Vec<u8>) -> Log {
        Log {
            inner: alloy::primitives::Log {
                address,
                data: LogData::new_unchecked(topics, Bytes::from(data)),
            },
            ..Default::default()
        }
    }

    fn message_delivered_log(
        network: &ArbitrumNetwork,
        index: u64,
        inbox: Address,
        kind: u8,
        sender: Address,
    ) -> Log {
        let mut data = vec![0u8; 6 * WORD];
        data[12..32].copy_from_slice(inbox.as_slice());
        data[63] = kind;
        data[76..96].copy_from_slice(sender.as_slice());
        data[96..128].copy_from_slice(&[0xab; 32]);
        data[128..160].copy_from_slice(&pad32(U256::from(1_000_000_000u64)));
        data[184..192].copy_from_slice(&1_700_000_000u64.to_be_bytes());

        log(
            network.bridge,
            vec![
                IBridge::MessageDelivered::SIGNATURE_HASH,
                B256::from(pad32(U256::from(index))),
                B256::repeat_byte(0x01),
            ],
            data,
        )
    }

    fn inbox_message_log(network: &ArbitrumNetwork, index: u64, payload: &[u8]) -> Log {
        let mut data = Vec::new();
        data.extend_from_slice(&pad32(U256::from(32)));
        data.extend_from_slice(&pad32(U256::from(payload.len())));
        data.extend_from_slice(payload);
        // ABI pads bytes to a word boundary
        data.resize(data.len().div_ceil(WORD) * WORD, 0);

        log(
            network.inbox,
            vec![
                IInbox::InboxMessageDelivered::SIGNATURE_HASH,
                B256::from(pad32(U256::from(index))),
            ],
            data,
        )
    }

    #[test]
    fn test_decode_submit_retryable() {
        let params = sample_params();
        let decoded = SubmitRetryableData::decode(&encode_payload(&params)).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn test_decode_truncated() {
        let err = SubmitRetryableData::decode(&[0u8; 100]).unwrap_err();
        assert_eq!(
            err,
            MessageError::Truncated {
                expected: 288,
                actual: 100
            }
        );

        let mut payload = encode_payload(&sample_params());
        payload.truncate(payload.len() - 1);
        assert!(matches!(
            SubmitRetryableData::decode(&payload),
            Err(MessageError::Truncated { .. })
        ));
    }

    #[test]
    fn test_parse_message_delivered() {
        let network = ArbitrumNetwork::arbitrum_sepolia();
        let sender = address!("2222000000000000000000000000000000003333");
        let parsed =
            parse_message_delivered_log(&message_delivered_log(&network, 77, network.inbox, 9, sender))
                .unwrap();

        assert_eq!(parsed.message_index, U256::from(77));
        assert_eq!(parsed.inbox, network.inbox);
        assert_eq!(parsed.kind, 9);
        assert_eq!(parsed.sender, sender);
        assert_eq!(parsed.message_data_hash, B256::repeat_byte(0xab));
        assert_eq!(parsed.base_fee_l1, U256::from(1_000_000_000u64));
        assert_eq!(parsed.timestamp, 1_700_000_000);
    }

    #[test]
    fn test_parse_rejects_other_events() {
        let network = ArbitrumNetwork::arbitrum_sepolia();
        let other = log(network.bridge, vec![B256::repeat_byte(0x99)], vec![0u8; 192]);
        assert!(parse_message_delivered_log(&other).is_none());
        assert!(parse_inbox_message_log(&other).is_none());
    }

    #[test]
    fn test_retryable_messages_pairs_events() {
        let network = ArbitrumNetwork::arbitrum_sepolia();
        let params = sample_params();
        let payload = encode_payload(&params);
        let sender = address!("2222000000000000000000000000000000003333");

        let logs = vec![
            inbox_message_log(&network, 5, &payload),
            message_delivered_log(&network, 5, network.inbox, 9, sender),
            // ETH deposit (kind 12) is ignored
            message_delivered_log(&network, 6, network.inbox, 12, sender),
            // another inbox is ignored
            message_delivered_log(&network, 7, Address::repeat_byte(0x55), 9, sender),
        ];

        let messages = retryable_messages(&logs, &network).unwrap();
        assert_eq!(messages.len(), 1);
        let message = &messages[0];
        assert_eq!(message.message_number, U256::from(5));
        assert_eq!(message.sender, sender);
        assert_eq!(message.chain_id, 421614);
        assert_eq!(message.params, params);
        assert_eq!(
            message.retryable_creation_id,
            calculate_retryable_id(421614, sender, U256::from(5), U256::from(1_000_000_000u64), &params)
        );
    }

    #[test]
    fn test_missing_inbox_message() {
        let network = ArbitrumNetwork::arbitrum_sepolia();
        let logs = vec![message_delivered_log(
            &network,
            3,
            network.inbox,
            9,
            Address::ZERO,
        )];
        assert_eq!(
            retryable_messages(&logs, &network),
            Err(MessageError::MissingInboxMessage(U256::from(3)))
        );
    }

    #[test]
    fn test_retryable_encoding_layout() {
        let params = sample_params();
        let sender = Address::repeat_byte(0x33);
        let encoded = retryable_tx_encoding(421614, sender, U256::from(5), U256::ZERO, &params);

        assert_eq!(encoded[0], 0x69);
        // long list header: 0xf8 + one length byte
        assert_eq!(encoded[1], 0xf8);
        assert_eq!(encoded[2] as usize, encoded.len() - 3);
        // chain id 421614 = 0x066eee as a 3-byte string
        assert_eq!(&encoded[3..7], &[0x83, 0x06, 0x6e, 0xee]);
        // message number is a 32-byte string
        assert_eq!(encoded[7], 0xa0);
        assert_eq!(encoded[7 + 32], 5);
        // sender address
        assert_eq!(encoded[40], 0x94);
        assert_eq!(&encoded[41..61], sender.as_slice());
        // zero base fee encodes as the empty string
        assert_eq!(encoded[61], 0x80);
    }

    #[test]
    fn test_retryable_id_deterministic_and_field_sensitive() {
        let params = sample_params();
        let sender = Address::repeat_byte(0x33);
        let base = calculate_retryable_id(421614, sender, U256::from(5), U256::from(7), &params);

        assert_eq!(
            base,
            calculate_retryable_id(421614, sender, U256::from(5), U256::from(7), &params)
        );
        assert_ne!(
            base,
            calculate_retryable_id(42161, sender, U256::from(5), U256::from(7), &params)
        );
        assert_ne!(
            base,
            calculate_retryable_id(421614, sender, U256::from(6), U256::from(7), &params)
        );

        let mut changed = params.clone();
        changed.gas_limit += U256::from(1);
        assert_ne!(
            base,
            calculate_retryable_id(421614, sender, U256::from(5), U256::from(7), &changed)
        );

        let mut no_dest = params.clone();
        no_dest.dest_address = Address::ZERO;
        assert_ne!(
            base,
            calculate_retryable_id(421614, sender, U256::from(5), U256::from(7), &no_dest)
        );
    }
}
