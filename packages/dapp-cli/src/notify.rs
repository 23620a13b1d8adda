//! Transaction progress messages
//!
//! Every write reports "Transaction Pending" when it is sent, then either
//! "Transaction Successful" with an explorer link or
//! "Transaction Failed: {reason}". Nothing is retried.

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::rpc::types::TransactionReceipt;
use crosslayer_rs::evm::EvmWriter;
use eyre::Result;
use tracing::{error, info};

pub const PENDING: &str = "Transaction Pending";
pub const SUCCESSFUL: &str = "Transaction Successful";

#[derive(Debug, Clone)]
pub struct Notifier {
    explorer_url: String,
}

impl Notifier {
    pub fn new(explorer_url: impl Into<String>) -> Self {
        Self {
            explorer_url: explorer_url.into(),
        }
    }

    pub fn tx_url(&self, tx_hash: B256) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }

    pub fn failure_message(reason: &eyre::Report) -> String {
        format!("Transaction Failed: {}", reason)
    }

    /// Send a contract call and report how it went
    pub async fn send(
        &self,
        writer: &EvmWriter,
        to: Address,
        data: Bytes,
        value: Option<U256>,
    ) -> Result<TransactionReceipt> {
        info!(to = %to, "{}", PENDING);

        match writer.send_call(to, data, value).await {
            Ok(receipt) => {
                info!(
                    tx_hash = %receipt.transaction_hash,
                    block = ?receipt.block_number,
                    "{}: {}",
                    SUCCESSFUL,
                    self.tx_url(receipt.transaction_hash)
                );
                Ok(receipt)
            }
            Err(e) => {
                error!("{}", Self::failure_message(&e));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_url() {
        let notifier = Notifier::new("https://explorer-holesky.morphl2.io");
        assert_eq!(
            notifier.tx_url(B256::repeat_byte(0xab)),
            format!("https://explorer-holesky.morphl2.io/tx/0x{}", "ab".repeat(32))
        );
    }

    #[test]
    fn test_failure_message() {
        let reason = eyre::eyre!("execution reverted");
        assert_eq!(
            Notifier::failure_message(&reason),
            "Transaction Failed: execution reverted"
        );
    }
}
