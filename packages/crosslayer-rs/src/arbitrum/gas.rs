//! Retryable ticket fee estimation
//!
//! A retryable needs four numbers before it can be submitted on L1:
//!
//! | Field                 | Source                                            | Default bump |
//! |-----------------------|---------------------------------------------------|--------------|
//! | `max_fee_per_gas`     | L2 `eth_gasPrice`                                 | +500 %       |
//! | `max_submission_cost` | `Inbox.calculateRetryableSubmissionFee` on L1     | +300 %       |
//! | `gas_limit`           | `eth_estimateGas` of `NodeInterface.estimateRetryableTicket` on L2 | +0 %, min 0 |
//! | `deposit`             | `gas_limit * max_fee_per_gas + max_submission_cost + l2_call_value` | -  |
//!
//! Each field can be pinned with a `base` or bumped by a different
//! percentage through [`RetryableGasOverrides`].

use alloy::primitives::{utils::parse_ether, Address, Bytes, U256};
use eyre::{eyre, Result, WrapErr};
use tracing::{debug, info};

use crate::arbitrum::contracts::{IInbox, NodeInterface, NODE_INTERFACE_ADDRESS};
use crate::arbitrum::network::ArbitrumNetwork;
use crate::evm::EvmReader;
use crate::units::percent_increase;

pub const DEFAULT_SUBMISSION_FEE_PERCENT_INCREASE: u64 = 300;
pub const DEFAULT_GAS_PRICE_PERCENT_INCREASE: u64 = 500;
pub const DEFAULT_GAS_LIMIT_PERCENT_INCREASE: u64 = 0;

/// Parameters of the L2 call a retryable will make
#[derive(Debug, Clone)]
pub struct RetryableRequest {
    /// L1 address submitting the retryable (not aliased)
    pub from: Address,
    /// L2 destination
    pub to: Address,
    pub l2_call_value: U256,
    /// Receives unused gas and submission fee on L2
    pub excess_fee_refund_address: Address,
    /// Receives `l2_call_value` if the ticket is cancelled or expires
    pub call_value_refund_address: Address,
    pub data: Bytes,
}

/// Override for a fee that is estimated then bumped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PercentIncreaseOverride {
    /// Skip the estimate and use this value
    pub base: Option<U256>,
    pub percent_increase: Option<U256>,
}

impl PercentIncreaseOverride {
    pub fn percent(percent: u64) -> Self {
        Self {
            base: None,
            percent_increase: Some(U256::from(percent)),
        }
    }

    fn apply(&self, estimated: U256, default_percent: u64) -> U256 {
        percent_increase(
            self.base.unwrap_or(estimated),
            self.percent_increase
                .unwrap_or(U256::from(default_percent)),
        )
    }
}

/// Gas limit override, which also carries a floor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasLimitOverride {
    pub base: Option<U256>,
    pub percent_increase: Option<U256>,
    pub min: Option<U256>,
}

impl GasLimitOverride {
    fn apply(&self, estimated: U256) -> U256 {
        let bumped = percent_increase(
            self.base.unwrap_or(estimated),
            self.percent_increase
                .unwrap_or(U256::from(DEFAULT_GAS_LIMIT_PERCENT_INCREASE)),
        );
        bumped.max(self.min.unwrap_or(U256::ZERO))
    }
}

/// Optional overrides for every estimated field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryableGasOverrides {
    pub gas_limit: GasLimitOverride,
    pub max_submission_fee: PercentIncreaseOverride,
    pub max_fee_per_gas: PercentIncreaseOverride,
    /// Fixed deposit; also used as the sender balance during gas estimation
    pub deposit: Option<U256>,
}

/// Fee parameters for one retryable submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryableFees {
    pub max_submission_cost: U256,
    pub gas_limit: U256,
    pub max_fee_per_gas: U256,
    /// ETH to send with the L1 transaction
    pub deposit: U256,
}

/// Combine bumped estimates into the final fee set
pub fn finalize_fees(
    max_submission_cost: U256,
    gas_limit: U256,
    max_fee_per_gas: U256,
    l2_call_value: U256,
    deposit_override: Option<U256>,
) -> RetryableFees {
    let deposit = deposit_override.unwrap_or_else(|| {
        gas_limit
            .saturating_mul(max_fee_per_gas)
            .saturating_add(max_submission_cost)
            .saturating_add(l2_call_value)
    });

    RetryableFees {
        max_submission_cost,
        gas_limit,
        max_fee_per_gas,
        deposit,
    }
}

/// Estimates retryable fees against an L1 and an L2 endpoint
pub struct RetryableGasEstimator<'a> {
    l1: &'a EvmReader,
    l2: &'a EvmReader,
    network: &'a ArbitrumNetwork,
}

impl<'a> RetryableGasEstimator<'a> {
    pub fn new(l1: &'a EvmReader, l2: &'a EvmReader, network: &'a ArbitrumNetwork) -> Self {
        Self { l1, l2, network }
    }

    /// L2 gas price bumped by the override (default +500 %)
    pub async fn estimate_max_fee_per_gas(
        &self,
        options: &PercentIncreaseOverride,
    ) -> Result<U256> {
        let base = match options.base {
            Some(base) => base,
            None => self.l2.gas_price().await.wrap_err("Failed to get L2 gas price")?,
        };
        Ok(options.apply(base, DEFAULT_GAS_PRICE_PERCENT_INCREASE))
    }

    /// Submission fee quoted by the inbox, bumped (default +300 %)
    pub async fn estimate_submission_fee(
        &self,
        data_length: usize,
        l1_base_fee: U256,
        options: &PercentIncreaseOverride,
    ) -> Result<U256> {
        let base = match options.base {
            Some(base) => base,
            None => {
                let inbox = IInbox::new(self.network.inbox, self.l1.provider());
                inbox
                    .calculateRetryableSubmissionFee(U256::from(data_length), l1_base_fee)
                    .call()
                    .await
                    .map_err(|e| eyre!("calculateRetryableSubmissionFee failed: {}", e))?
                    ._0
            }
        };
        Ok(options.apply(base, DEFAULT_SUBMISSION_FEE_PERCENT_INCREASE))
    }

    /// L2 gas needed to execute the retryable, bumped and floored.
    ///
    /// `sender_deposit` defaults to 1 ether plus the call value so the
    /// estimate does not fail on the sender's balance.
    pub async fn estimate_retryable_gas_limit(
        &self,
        request: &RetryableRequest,
        sender_deposit: Option<U256>,
        options: &GasLimitOverride,
    ) -> Result<U256> {
        let base = match options.base {
            Some(base) => base,
            None => {
                let deposit = match sender_deposit {
                    Some(d) => d,
                    None => parse_ether("1")?.saturating_add(request.l2_call_value),
                };
                let node = NodeInterface::new(NODE_INTERFACE_ADDRESS, self.l2.provider());
                let gas = node
                    .estimateRetryableTicket(
                        request.from,
                        deposit,
                        request.to,
                        request.l2_call_value,
                        request.excess_fee_refund_address,
                        request.call_value_refund_address,
                        request.data.clone(),
                    )
                    .estimate_gas()
                    .await
                    .map_err(|e| eyre!("estimateRetryableTicket failed: {}", e))?;
                U256::from(gas)
            }
        };
        Ok(options.apply(base))
    }

    /// Estimate every field. Calls run one after another.
    pub async fn estimate_all(
        &self,
        request: &RetryableRequest,
        l1_base_fee: U256,
        overrides: &RetryableGasOverrides,
    ) -> Result<RetryableFees> {
        let max_fee_per_gas = self
            .estimate_max_fee_per_gas(&overrides.max_fee_per_gas)
            .await?;
        debug!(max_fee_per_gas = %max_fee_per_gas, "Estimated max fee per gas");

        let max_submission_cost = self
            .estimate_submission_fee(
                request.data.len(),
                l1_base_fee,
                &overrides.max_submission_fee,
            )
            .await?;
        debug!(max_submission_cost = %max_submission_cost, "Estimated submission fee");

        let gas_limit = self
            .estimate_retryable_gas_limit(request, overrides.deposit, &overrides.gas_limit)
            .await?;
        debug!(gas_limit = %gas_limit, "Estimated retryable gas limit");

        let fees = finalize_fees(
            max_submission_cost,
            gas_limit,
            max_fee_per_gas,
            request.l2_call_value,
            overrides.deposit,
        );

        info!(
            max_submission_cost = %fees.max_submission_cost,
            gas_limit = %fees.gas_limit,
            max_fee_per_gas = %fees.max_fee_per_gas,
            deposit = %fees.deposit,
            "Estimated retryable fees"
        );

        Ok(fees)
    }
}
