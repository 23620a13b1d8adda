//! `demo`: send `setValues` from L1 to L2 as a retryable ticket
//!
//! build call data -> estimate fees -> submit on L1 with the deposit ->
//! derive the retryable from the receipt -> wait for it on L2 -> read L2

use alloy::primitives::{Bytes, U256};
use alloy::sol_types::SolCall;
use crosslayer_rs::arbitrum::gas::{GasLimitOverride, PercentIncreaseOverride};
use crosslayer_rs::arbitrum::status::DEFAULT_STATUS_TIMEOUT;
use crosslayer_rs::arbitrum::{
    retryable_messages_from_receipt, ArbitrumNetwork, MessageStatus, ProviderStatusSource,
    RetryableFees, RetryableGasEstimator, RetryableGasOverrides, RetryableRequest,
    StatusTracker,
};
use crosslayer_rs::banner;
use crosslayer_rs::evm::{EvmReader, EvmWriter};
use eyre::{eyre, Result};
use tracing::{info, warn};

use crate::commands::show::l2_values;
use crate::config::BothChainsConfig;
use crate::contracts::RetryableTicketL1;
use crate::values::ContractValues;

/// Gas limit floor 10000 and +30 % on every estimate
pub fn demo_gas_overrides() -> RetryableGasOverrides {
    RetryableGasOverrides {
        gas_limit: GasLimitOverride {
            base: None,
            percent_increase: Some(U256::from(30)),
            min: Some(U256::from(10000)),
        },
        max_submission_fee: PercentIncreaseOverride::percent(30),
        max_fee_per_gas: PercentIncreaseOverride::percent(30),
        deposit: None,
    }
}

/// Call data for `RetryableTicketL1.setValuesInL2`
pub fn set_values_in_l2_calldata(
    values: &ContractValues,
    fees: &RetryableFees,
    gas_price_bid: U256,
) -> Bytes {
    RetryableTicketL1::setValuesInL2Call {
        _myBool: values.my_bool,
        _myUint: values.my_uint,
        _myAddress: values.my_address,
        _myString: values.my_string.clone(),
        maxSubmissionCost: fees.max_submission_cost,
        maxGas: fees.gas_limit,
        gasPriceBid: gas_price_bid,
    }
    .abi_encode()
    .into()
}

pub async fn demo(config: &BothChainsConfig) -> Result<MessageStatus> {
    banner("Cross-chain Retryable Ticket Demo");

    let l1 = EvmReader::new(&config.l1_rpc_url)?;
    let l2 = EvmReader::new(&config.l2_rpc_url)?;
    let writer = EvmWriter::new(&config.l1_rpc_url, config.private_key.expose())?;
    let wallet = writer.address();

    info!(l1_contract = %config.l1_contract, "Getting L1 Retryable Ticket Contract");
    info!(l2_contract = %config.l2_contract, "Getting L2 Retryable Ticket Contract");

    l2_values(&l2, config.l2_contract)
        .await?
        .print("Current L2");
    println!();

    info!("Updating Values from L1 to L2:");
    let update = ContractValues::demo_update();

    let network = ArbitrumNetwork::with_overrides(l2.chain_id().await?)?;
    let estimator = RetryableGasEstimator::new(&l1, &l2, &network);

    let request = RetryableRequest {
        from: config.l1_contract,
        to: config.l2_contract,
        l2_call_value: U256::ZERO,
        excess_fee_refund_address: wallet,
        call_value_refund_address: wallet,
        data: update.set_values_calldata(),
    };

    let l1_base_fee = l1.base_fee().await?;
    let fees = estimator
        .estimate_all(&request, l1_base_fee, &demo_gas_overrides())
        .await?;
    info!(
        "Current retryable base submission price is: {}",
        fees.max_submission_cost
    );

    let gas_price_bid = l2.gas_price().await?;
    info!("L2 gas price: {}", gas_price_bid);

    info!("Sending to L2 with {} callValue for L2 fees:", fees.deposit);
    let receipt = writer
        .send_call(
            config.l1_contract,
            set_values_in_l2_calldata(&update, &fees, gas_price_bid),
            Some(fees.deposit),
        )
        .await?;
    info!(
        "RetryableTicket txn confirmed on L1! {}",
        receipt.transaction_hash
    );

    // One L1 transaction may create several retryables; this one creates exactly one
    let messages = retryable_messages_from_receipt(&receipt, &network)?;
    let message = messages
        .first()
        .ok_or_else(|| eyre!("No retryable ticket found in {}", receipt.transaction_hash))?;

    info!("Waiting for the L2 execution of the transaction. This may take up to 10-15 minutes");
    let tracker = StatusTracker::new(ProviderStatusSource::new(&l2));
    let status = tracker
        .wait_for_status(message, DEFAULT_STATUS_TIMEOUT)
        .await?;

    match status {
        MessageStatus::Redeemed { l2_tx_hash } => {
            info!("L2 retryable ticket is executed {}", l2_tx_hash)
        }
        other => warn!("L2 retryable ticket is failed with status {}", other),
    }

    // L2 sees the aliased L1 contract as msg.sender
    let updated = l2_values(&l2, config.l2_contract).await?;
    println!();
    updated.print("Updated L2");

    Ok(status)
}
