//! `deploy-l1` and `deploy-l2`

use alloy::primitives::{Address, Bytes};
use crosslayer_rs::arbitrum::ArbitrumNetwork;
use crosslayer_rs::evm::verify::explorer_api_for_chain;
use crosslayer_rs::evm::{
    EvmReader, EvmWriter, ExplorerVerifier, HardhatArtifact, VerificationOutcome,
    VerificationRequest,
};
use crosslayer_rs::{banner, Redacted};
use eyre::{eyre, Result, WrapErr};
use tracing::info;

use crate::config::{DeployL1Config, DeployL2Config};
use crate::contracts::{L1_CONTRACT_NAME, L2_CONTRACT_NAME};
use crate::values::ContractValues;

/// Deploy `RetryableTicketL1` pointed at the L2 network's inbox, then verify it
pub async fn deploy_l1(config: &DeployL1Config) -> Result<Address> {
    banner("Deploy L1 Contract and Verify");

    let l1 = EvmReader::new(&config.l1_rpc_url)?;
    let l2 = EvmReader::new(&config.l2_rpc_url)?;

    // The inbox lives on L1 but is resolved from the L2 network
    let l2_chain_id = l2.chain_id().await?;
    let network = ArbitrumNetwork::with_overrides(l2_chain_id)?;
    info!(network = %network.name, inbox = %network.inbox, "Resolved Arbitrum network");

    let artifact = HardhatArtifact::find(&config.artifacts_dir, L1_CONTRACT_NAME)?;
    let writer = EvmWriter::new(&config.l1_rpc_url, config.private_key.expose())?;

    info!("Deploying L1 Retryable Ticket Contract");
    let constructor_args =
        ContractValues::l1_initial().l1_constructor_args(Address::ZERO, network.inbox);
    let (address, _) = writer.deploy(&artifact.bytecode, &constructor_args).await?;
    info!(address = %address, "Deployed to {}", address);

    let api_url = explorer_api(config.l1_explorer_api.as_deref(), l1.chain_id().await?)?;
    verify_deployment(
        &artifact,
        address,
        constructor_args,
        &api_url,
        &config.l1_explorer_key,
    )
    .await?;
    info!("L1 Contract Verified on Etherscan!");

    Ok(address)
}

/// Deploy `RetryableTicketL2` trusting the given L1 contract, then verify it
pub async fn deploy_l2(config: &DeployL2Config) -> Result<Address> {
    banner("Deploy L2 Contract and Verify");

    let l2 = EvmReader::new(&config.l2_rpc_url)?;
    let artifact = HardhatArtifact::find(&config.artifacts_dir, L2_CONTRACT_NAME)?;
    let writer = EvmWriter::new(&config.l2_rpc_url, config.private_key.expose())?;

    info!("Deploying L2 Retryable Ticket Contract");
    let constructor_args = ContractValues::l2_initial().l2_constructor_args(config.l1_contract);
    let (address, _) = writer.deploy(&artifact.bytecode, &constructor_args).await?;
    info!(address = %address, "Deployed to {}", address);

    let api_url = explorer_api(config.l2_explorer_api.as_deref(), l2.chain_id().await?)?;
    verify_deployment(
        &artifact,
        address,
        constructor_args,
        &api_url,
        &config.l2_explorer_key,
    )
    .await?;
    info!("L2 Contract Verified on Etherscan!");

    Ok(address)
}

fn explorer_api(configured: Option<&str>, chain_id: u64) -> Result<String> {
    configured
        .map(str::to_string)
        .or_else(|| explorer_api_for_chain(chain_id).map(str::to_string))
        .ok_or_else(|| {
            eyre!(
                "No explorer API known for chain {}; set L1_EXPLORER_API_URL / L2_EXPLORER_API_URL",
                chain_id
            )
        })
}

async fn verify_deployment(
    artifact: &HardhatArtifact,
    address: Address,
    constructor_args: Vec<u8>,
    api_url: &str,
    api_key: &Redacted<String>,
) -> Result<VerificationOutcome> {
    let build_info = artifact
        .build_info()
        .wrap_err("Build info is required for verification")?;

    let request = VerificationRequest {
        address,
        contract_name: artifact.fully_qualified_name(),
        source_code: build_info.standard_json_input()?,
        compiler_version: build_info.compiler_version(),
        constructor_args: Bytes::from(constructor_args),
    };

    ExplorerVerifier::new(api_url, api_key.expose())?
        .verify(&request)
        .await
}
