//! Retryable Status Tracking
//!
//! Decides where a retryable ticket is in its lifecycle by querying L2:
//!
//! ```text
//! creation receipt missing ............................ NotYetCreated
//! creation receipt reverted ........................... CreationFailed
//! auto-redeem (RedeemScheduled in creation receipt) ok  Redeemed
//! ticket still alive (getTimeout >= latest timestamp) . FundsDepositedOnL2
//! a manual redeem succeeded ........................... Redeemed
//! otherwise ........................................... Expired
//! ```
//!
//! L2 access goes through [`L2StatusSource`] so the decision table can be
//! exercised without a node.

use alloy::primitives::B256;
use alloy::rpc::types::{Filter, Log};
use alloy::sol_types::{SolError, SolEvent};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::arbitrum::contracts::{ArbRetryableTx, ARB_RETRYABLE_TX_ADDRESS};
use crate::arbitrum::message::RetryableMessage;
use crate::evm::EvmReader;

/// Default interval between status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// L2 execution usually lands within 10-15 minutes
pub const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Lifecycle of a retryable ticket on L2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    /// Creation transaction not yet included on L2
    NotYetCreated,
    /// Creation transaction reverted
    CreationFailed,
    /// Ticket exists but has not been redeemed; it can still be redeemed manually
    FundsDepositedOnL2,
    /// Executed on L2 by the given transaction
    Redeemed { l2_tx_hash: B256 },
    /// Lifetime elapsed without a successful redeem
    Expired,
}

impl MessageStatus {
    /// Whether polling should stop
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MessageStatus::NotYetCreated)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageStatus::NotYetCreated => write!(f, "NOT_YET_CREATED"),
            MessageStatus::CreationFailed => write!(f, "CREATION_FAILED"),
            MessageStatus::FundsDepositedOnL2 => write!(f, "FUNDS_DEPOSITED_ON_L2"),
            MessageStatus::Redeemed { .. } => write!(f, "REDEEMED"),
            MessageStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("L2 query failed: {0}")]
    Rpc(String),

    #[error("Retryable {ticket_id} still {last_status} after {waited:?}")]
    Timeout {
        ticket_id: B256,
        waited: Duration,
        last_status: MessageStatus,
    },
}

/// The parts of an L2 receipt the tracker looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub success: bool,
    pub logs: Vec<Log>,
}

/// L2 queries needed to classify a retryable
#[async_trait]
pub trait L2StatusSource: Send + Sync {
    /// Receipt of an L2 transaction, `None` if not mined
    async fn receipt(&self, tx_hash: B256) -> Result<Option<ReceiptSummary>, TrackerError>;

    /// `ArbRetryableTx.getTimeout(ticket_id)`, `None` once the ticket is gone
    async fn retryable_timeout(&self, ticket_id: B256) -> Result<Option<u64>, TrackerError>;

    /// Timestamp of the latest L2 block
    async fn latest_timestamp(&self) -> Result<u64, TrackerError>;

    /// `RedeemScheduled` logs for a ticket from `from_block` on
    async fn redeem_scheduled_logs(
        &self,
        ticket_id: B256,
        from_block: u64,
    ) -> Result<Vec<Log>, TrackerError>;
}

/// `(ticket_id, retry_tx_hash)` of a `RedeemScheduled` log
///
/// Event: RedeemScheduled(bytes32 indexed ticketId, bytes32 indexed retryTxHash,
///                        uint64 indexed sequenceNum, uint64 donatedGas,
///                        address gasDonor, uint256 maxRefund, uint256 submissionFeeRefund)
pub fn parse_redeem_scheduled_log(log: &Log) -> Option<(B256, B256)> {
    let topics = log.topics();
    if log.address() != ARB_RETRYABLE_TX_ADDRESS
        || topics.len() < 3
        || topics[0] != ArbRetryableTx::RedeemScheduled::SIGNATURE_HASH
    {
        return None;
    }
    Some((topics[1], topics[2]))
}

// =============================================================================
// Provider-backed Source
// =============================================================================

/// [`L2StatusSource`] backed by an L2 RPC endpoint
pub struct ProviderStatusSource<'a> {
    reader: &'a EvmReader,
}

impl<'a> ProviderStatusSource<'a> {
    pub fn new(reader: &'a EvmReader) -> Self {
        Self { reader }
    }
}

/// True only for a `NoTicketWithID` revert; other node errors must not read as expiry
fn is_missing_ticket(err: &alloy::contract::Error) -> bool {
    let alloy::contract::Error::TransportError(e) = err else {
        return false;
    };
    e.as_error_resp()
        .and_then(|resp| resp.as_revert_data())
        .is_some_and(|data| data.starts_with(&ArbRetryableTx::NoTicketWithID::SELECTOR))
}

#[async_trait]
impl<'a> L2StatusSource for ProviderStatusSource<'a> {
    async fn receipt(&self, tx_hash: B256) -> Result<Option<ReceiptSummary>, TrackerError> {
        let receipt = self
            .reader
            .receipt(tx_hash)
            .await
            .map_err(|e| TrackerError::Rpc(e.to_string()))?;

        Ok(receipt.map(|r| ReceiptSummary {
            tx_hash: r.transaction_hash,
            block_number: r.block_number,
            success: r.status(),
            logs: r.inner.logs().to_vec(),
        }))
    }

    async fn retryable_timeout(&self, ticket_id: B256) -> Result<Option<u64>, TrackerError> {
        let contract = ArbRetryableTx::new(ARB_RETRYABLE_TX_ADDRESS, self.reader.provider());

        match contract.getTimeout(ticket_id).call().await {
            Ok(ret) => Ok(Some(ret._0.saturating_to::<u64>())),
            // getTimeout reverts with NoTicketWithID once the ticket is redeemed or expired
            Err(e) if is_missing_ticket(&e) => {
                debug!(ticket_id = %ticket_id, "Retryable no longer exists");
                Ok(None)
            }
            Err(e) => {
                warn!(ticket_id = %ticket_id, error = %e, "getTimeout failed");
                Err(TrackerError::Rpc(e.to_string()))
            }
        }
    }

    async fn latest_timestamp(&self) -> Result<u64, TrackerError> {
        let header = self
            .reader
            .latest_header()
            .await
            .map_err(|e| TrackerError::Rpc(e.to_string()))?;
        Ok(header.timestamp)
    }

    async fn redeem_scheduled_logs(
        &self,
        ticket_id: B256,
        from_block: u64,
    ) -> Result<Vec<Log>, TrackerError> {
        let filter = Filter::new()
            .address(ARB_RETRYABLE_TX_ADDRESS)
            .event_signature(ArbRetryableTx::RedeemScheduled::SIGNATURE_HASH)
            .topic1(ticket_id)
            .from_block(from_block);

        self.reader
            .logs(&filter)
            .await
            .map_err(|e| TrackerError::Rpc(e.to_string()))
    }
}

// =============================================================================
// Tracker
// =============================================================================

/// Classifies retryables and waits for them to settle
pub struct StatusTracker<S> {
    source: S,
    poll_interval: Duration,
}

impl<S: L2StatusSource> StatusTracker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Current status of a retryable
    pub async fn status(&self, message: &RetryableMessage) -> Result<MessageStatus, TrackerError> {
        let ticket_id = message.retryable_creation_id;

        let creation = match self.source.receipt(ticket_id).await? {
            None => return Ok(MessageStatus::NotYetCreated),
            Some(receipt) if !receipt.success => return Ok(MessageStatus::CreationFailed),
            Some(receipt) => receipt,
        };

        // Auto-redeem is scheduled inside the creation transaction
        let auto_redeem = creation
            .logs
            .iter()
            .filter_map(parse_redeem_scheduled_log)
            .find(|(id, _)| *id == ticket_id);
        if let Some((_, retry_tx_hash)) = auto_redeem {
            if let Some(status) = self.redeemed_by(retry_tx_hash).await? {
                return Ok(status);
            }
        }

        if let Some(timeout) = self.source.retryable_timeout(ticket_id).await? {
            let now = self.source.latest_timestamp().await?;
            if timeout >= now {
                return Ok(MessageStatus::FundsDepositedOnL2);
            }
        }

        // Ticket is gone: either manually redeemed or expired
        let from_block = creation.block_number.unwrap_or_default();
        let logs = self
            .source
            .redeem_scheduled_logs(ticket_id, from_block)
            .await?;
        for (id, retry_tx_hash) in logs.iter().filter_map(parse_redeem_scheduled_log) {
            if id != ticket_id {
                continue;
            }
            if let Some(status) = self.redeemed_by(retry_tx_hash).await? {
                return Ok(status);
            }
        }

        Ok(MessageStatus::Expired)
    }

    async fn redeemed_by(&self, retry_tx_hash: B256) -> Result<Option<MessageStatus>, TrackerError> {
        Ok(match self.source.receipt(retry_tx_hash).await? {
            Some(receipt) if receipt.success => Some(MessageStatus::Redeemed {
                l2_tx_hash: receipt.tx_hash,
            }),
            Some(_) => {
                debug!(retry_tx_hash = %retry_tx_hash, "Redeem attempt reverted");
                None
            }
            None => None,
        })
    }

    /// Poll until the status is terminal or `timeout` passes
    pub async fn wait_for_status(
        &self,
        message: &RetryableMessage,
        timeout: Duration,
    ) -> Result<MessageStatus, TrackerError> {
        let ticket_id = message.retryable_creation_id;
        let start = Instant::now();

        info!(
            ticket_id = %ticket_id,
            timeout_secs = timeout.as_secs(),
            "Waiting for retryable status on L2"
        );

        loop {
            let status = self.status(message).await?;
            if status.is_terminal() {
                info!(ticket_id = %ticket_id, status = %status, "Retryable settled");
                return Ok(status);
            }

            let waited = start.elapsed();
            if waited >= timeout {
                warn!(ticket_id = %ticket_id, status = %status, "Timed out waiting for retryable");
                return Err(TrackerError::Timeout {
                    ticket_id,
                    waited,
                    last_status: status,
                });
            }

            debug!(ticket_id = %ticket_id, status = %status, "Retryable not settled yet");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
