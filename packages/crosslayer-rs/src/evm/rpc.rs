//! Raw JSON-RPC probe
//!
//! A few header fields (timestamp, base fee) are read directly over
//! JSON-RPC so the status tracker does not depend on the block type of a
//! particular alloy release.

use eyre::{eyre, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Block header fields used by fee estimation and ticket expiry checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub number: u64,
    pub timestamp: u64,
    /// `None` on chains without EIP-1559
    pub base_fee_per_gas: Option<u128>,
}

/// Block as returned by `eth_getBlockByNumber` (header fields only)
#[derive(Debug, Deserialize)]
struct RpcBlock {
    number: String,
    timestamp: String,
    #[serde(rename = "baseFeePerGas")]
    base_fee_per_gas: Option<String>,
}

/// JSON-RPC response wrapper
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

/// JSON-RPC error
#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Minimal JSON-RPC client for header queries
#[derive(Debug, Clone)]
pub struct JsonRpcProbe {
    rpc_url: String,
    client: Client,
}

impl JsonRpcProbe {
    /// Create a new probe for an RPC endpoint
    pub fn new(rpc_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            client,
        })
    }

    /// Fetch the latest block header
    pub async fn latest_header(&self) -> Result<BlockHeader> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_getBlockByNumber",
            "params": ["latest", false],
            "id": 1
        });

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await?
            .json::<RpcResponse<RpcBlock>>()
            .await?;

        if let Some(error) = response.error {
            return Err(eyre!("RPC error: {} - {}", error.code, error.message));
        }

        let block = response
            .result
            .ok_or_else(|| eyre!("No latest block returned"))?;
        parse_block(&block)
    }
}

fn parse_block(block: &RpcBlock) -> Result<BlockHeader> {
    Ok(BlockHeader {
        number: parse_hex_u64(&block.number)?,
        timestamp: parse_hex_u64(&block.timestamp)?,
        base_fee_per_gas: block
            .base_fee_per_gas
            .as_deref()
            .map(parse_hex_u128)
            .transpose()?,
    })
}

fn parse_hex_u64(hex: &str) -> Result<u64> {
    u64::from_str_radix(hex.trim_start_matches("0x"), 16)
        .map_err(|e| eyre!("Invalid hex quantity {}: {}", hex, e))
}

fn parse_hex_u128(hex: &str) -> Result<u128> {
    u128::from_str_radix(hex.trim_start_matches("0x"), 16)
        .map_err(|e| eyre!("Invalid hex quantity {}: {}", hex, e))
}
