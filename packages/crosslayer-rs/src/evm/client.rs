//! EVM RPC Clients
//!
//! [`EvmReader`] wraps a read-only provider for view calls, receipts and
//! logs. [`EvmWriter`] holds a private key and submits transactions.
//!
//! # Transaction Building
//!
//! The writer uses `ProviderBuilder::with_recommended_fillers()` so nonce,
//! gas limit and EIP-1559 fees are populated automatically. A provider is
//! built per call; the signer and RPC URL are the only long-lived state.

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, B256, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{Filter, Log, TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use eyre::{eyre, Result, WrapErr};
use std::time::Duration;
use tracing::{debug, info};

use crate::evm::rpc::{BlockHeader, JsonRpcProbe};

/// Default time to wait for a transaction receipt
pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(300);

/// Read-only EVM client
pub struct EvmReader {
    provider: RootProvider<Http<Client>>,
    probe: JsonRpcProbe,
    rpc_url: String,
}

impl EvmReader {
    /// Create a new read-only client
    pub fn new(rpc_url: &str) -> Result<Self> {
        let provider = ProviderBuilder::new().on_http(
            rpc_url
                .parse()
                .map_err(|e| eyre!("Invalid RPC URL: {}", e))?,
        );
        let probe = JsonRpcProbe::new(rpc_url)?;

        debug!(rpc_url = %rpc_url, "Created read-only EVM client");

        Ok(Self {
            provider,
            probe,
            rpc_url: rpc_url.to_string(),
        })
    }

    /// Get the underlying provider (for `sol!` contract instances)
    pub fn provider(&self) -> &RootProvider<Http<Client>> {
        &self.provider
    }

    /// RPC URL this client talks to
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Get the chain ID from the RPC
    pub async fn chain_id(&self) -> Result<u64> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .wrap_err("Failed to get chain id")?;
        Ok(chain_id)
    }

    /// Get the current block number
    pub async fn block_number(&self) -> Result<u64> {
        let block = self.provider.get_block_number().await?;
        Ok(block)
    }

    /// Get the current gas price
    pub async fn gas_price(&self) -> Result<U256> {
        let price = self
            .provider
            .get_gas_price()
            .await
            .wrap_err("Failed to get gas price")?;
        Ok(U256::from(price))
    }

    /// Get the latest block header
    pub async fn latest_header(&self) -> Result<BlockHeader> {
        self.probe.latest_header().await
    }

    /// Base fee of the latest block
    pub async fn base_fee(&self) -> Result<U256> {
        let header = self.latest_header().await?;
        header
            .base_fee_per_gas
            .map(U256::from)
            .ok_or_else(|| eyre!("Latest block {} has no base fee", header.number))
    }

    /// Get a transaction receipt (None while pending or unknown)
    pub async fn receipt(&self, tx_hash: B256) -> Result<Option<TransactionReceipt>> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .wrap_err_with(|| format!("Failed to get receipt for {}", tx_hash))?;
        Ok(receipt)
    }

    /// Fetch logs matching a filter
    pub async fn logs(&self, filter: &Filter) -> Result<Vec<Log>> {
        let logs = self
            .provider
            .get_logs(filter)
            .await
            .wrap_err("Failed to get logs")?;
        Ok(logs)
    }
}

/// EVM client with signing capabilities
pub struct EvmWriter {
    rpc_url: String,
    signer: PrivateKeySigner,
    receipt_timeout: Duration,
}

impl EvmWriter {
    /// Create a new signing client
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self> {
        let _: url::Url = rpc_url
            .parse()
            .map_err(|e| eyre!("Invalid RPC URL: {}", e))?;
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e| eyre!("Invalid private key: {}", e))?;

        info!(
            rpc_url = %rpc_url,
            address = %signer.address(),
            "Created EVM client with signer"
        );

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            signer,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
        })
    }

    /// Override how long to wait for receipts
    pub fn with_receipt_timeout(mut self, timeout: Duration) -> Self {
        self.receipt_timeout = timeout;
        self
    }

    /// Get the signer address
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// RPC URL this client talks to
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Build a provider with wallet and recommended fillers
    pub fn provider(&self) -> Result<impl Provider<Http<Client>> + Clone> {
        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(wallet)
            .on_http(self.rpc_url.parse().wrap_err("Invalid RPC URL")?);
        Ok(provider)
    }

    /// Send a contract call and wait for a successful receipt
    pub async fn send_call(
        &self,
        to: Address,
        data: Bytes,
        value: Option<U256>,
    ) -> Result<TransactionReceipt> {
        let mut tx = TransactionRequest::default().to(to).input(data.into());
        if let Some(v) = value {
            tx = tx.value(v);
        }

        self.send_and_confirm(tx).await
    }

    /// Deploy contract bytecode with ABI-encoded constructor arguments.
    ///
    /// Returns the new contract address and the deployment receipt.
    pub async fn deploy(
        &self,
        bytecode: &Bytes,
        constructor_args: &[u8],
    ) -> Result<(Address, TransactionReceipt)> {
        if bytecode.is_empty() {
            return Err(eyre!("Cannot deploy empty bytecode (abstract contract or interface?)"));
        }

        let mut code = bytecode.to_vec();
        code.extend_from_slice(constructor_args);
        let tx = TransactionRequest::default().with_deploy_code(Bytes::from(code));

        let receipt = self.send_and_confirm(tx).await?;
        let address = receipt
            .contract_address
            .ok_or_else(|| eyre!("Deployment receipt has no contract address"))?;

        Ok((address, receipt))
    }

    async fn send_and_confirm(&self, tx: TransactionRequest) -> Result<TransactionReceipt> {
        let provider = self.provider()?;

        let pending = provider
            .send_transaction(tx)
            .await
            .wrap_err("Failed to send transaction")?;

        let tx_hash = *pending.tx_hash();
        info!(tx_hash = %tx_hash, "Transaction pending");

        let receipt = pending
            .with_timeout(Some(self.receipt_timeout))
            .get_receipt()
            .await
            .wrap_err_with(|| format!("Failed to get receipt for {}", tx_hash))?;

        ensure_success(&receipt)?;
        Ok(receipt)
    }
}

/// Fail if a receipt reports a reverted transaction
pub fn ensure_success(receipt: &TransactionReceipt) -> Result<()> {
    if receipt.status() {
        Ok(())
    } else {
        Err(eyre!(
            "Transaction {} reverted in block {:?}",
            receipt.transaction_hash,
            receipt.block_number
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_writer_derives_address() {
        let writer = EvmWriter::new("http://localhost:8545", ANVIL_KEY).unwrap();
        assert_eq!(
            writer.address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn test_writer_rejects_bad_key() {
        assert!(EvmWriter::new("http://localhost:8545", "0x1234").is_err());
    }

    #[test]
    fn test_writer_rejects_bad_url() {
        assert!(EvmWriter::new("not a url", ANVIL_KEY).is_err());
    }

    #[test]
    fn test_reader_rejects_bad_url() {
        assert!(EvmReader::new("not a url").is_err());
    }

    #[test]
    fn test_receipt_timeout_override() {
        let writer = EvmWriter::new("http://localhost:8545", ANVIL_KEY)
            .unwrap()
            .with_receipt_timeout(Duration::from_secs(5));
        assert_eq!(writer.receipt_timeout, Duration::from_secs(5));
    }
}
