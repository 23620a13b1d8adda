//! `update-l1`

use alloy::sol_types::SolCall;
use crosslayer_rs::banner;
use crosslayer_rs::evm::EvmWriter;
use eyre::Result;
use tracing::info;

use crate::config::UpdateL1Config;
use crate::contracts::RetryableTicketL1;

/// Point the L1 contract at the deployed L2 contract
pub async fn update_l1(config: &UpdateL1Config) -> Result<()> {
    banner("Update L2 Contract Address in L1 Contract");

    let writer = EvmWriter::new(&config.l1_rpc_url, config.private_key.expose())?;
    info!(l1_contract = %config.l1_contract, "Getting L1 Retryable Ticket Contract");

    let data = RetryableTicketL1::updateL2TargetCall {
        _l2Target: config.l2_contract,
    }
    .abi_encode();

    let receipt = writer
        .send_call(config.l1_contract, data.into(), None)
        .await?;

    info!(
        tx_hash = %receipt.transaction_hash,
        l2_contract = %config.l2_contract,
        "L2 Contract Address in L1 Contract successfully Updated"
    );
    Ok(())
}
