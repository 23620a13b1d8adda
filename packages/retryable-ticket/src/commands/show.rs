//! `show`

use alloy::primitives::Address;
use crosslayer_rs::banner;
use crosslayer_rs::evm::EvmReader;
use eyre::{eyre, Result};
use tracing::info;

use crate::config::BothChainsConfig;
use crate::contracts::{RetryableTicketL1, RetryableTicketL2};
use crate::values::ContractValues;

/// Read `showValues()` from the L1 contract
pub async fn l1_values(reader: &EvmReader, contract: Address) -> Result<ContractValues> {
    let l1 = RetryableTicketL1::new(contract, reader.provider());
    let ret = l1
        .showValues()
        .call()
        .await
        .map_err(|e| eyre!("showValues on L1 {} failed: {}", contract, e))?;
    Ok(ret.into())
}

/// Read `showValues()` from the L2 contract
pub async fn l2_values(reader: &EvmReader, contract: Address) -> Result<ContractValues> {
    let l2 = RetryableTicketL2::new(contract, reader.provider());
    let ret = l2
        .showValues()
        .call()
        .await
        .map_err(|e| eyre!("showValues on L2 {} failed: {}", contract, e))?;
    Ok(ret.into())
}

/// Print both contracts' values
pub async fn show(config: &BothChainsConfig) -> Result<()> {
    banner("Show Values");

    let l1 = EvmReader::new(&config.l1_rpc_url)?;
    let l2 = EvmReader::new(&config.l2_rpc_url)?;

    info!(l1_contract = %config.l1_contract, "Getting L1 RetryableTicket Contract");
    l1_values(&l1, config.l1_contract)
        .await?
        .print("Current L1");
    println!();

    info!(l2_contract = %config.l2_contract, "Getting L2 RetryableTicket Contract");
    l2_values(&l2, config.l2_contract)
        .await?
        .print("Current L2");

    Ok(())
}
