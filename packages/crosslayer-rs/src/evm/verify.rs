//! Explorer Source Verification
//!
//! Submits standard-JSON compiler input to an Etherscan-compatible API
//! (`module=contract&action=verifysourcecode`) and polls
//! `checkverifystatus` until the explorer reports a result.
//!
//! Explorers index freshly deployed bytecode with a delay, so a submission
//! rejected with "Unable to locate ContractCode" is resubmitted a few times.

use alloy::primitives::{Address, Bytes};
use eyre::{eyre, Result, WrapErr};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::redact::Redacted;

/// Default delay between status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Maximum number of status polls before giving up
const MAX_STATUS_POLLS: u32 = 60;

/// Maximum submissions while the explorer has not indexed the bytecode yet
const MAX_SUBMIT_ATTEMPTS: u32 = 5;

/// Default Etherscan-compatible API for a chain id
pub fn explorer_api_for_chain(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("https://api.etherscan.io/api"),
        11155111 => Some("https://api-sepolia.etherscan.io/api"),
        42161 => Some("https://api.arbiscan.io/api"),
        42170 => Some("https://api-nova.arbiscan.io/api"),
        421614 => Some("https://api-sepolia.arbiscan.io/api"),
        _ => None,
    }
}

/// Everything an explorer needs to verify one deployed contract
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub address: Address,
    /// Fully qualified name, `contracts/Foo.sol:Foo`
    pub contract_name: String,
    /// Standard-JSON compiler input, serialized
    pub source_code: String,
    /// Compiler version with leading `v`
    pub compiler_version: String,
    /// ABI-encoded constructor arguments
    pub constructor_args: Bytes,
}

/// Successful verification result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    AlreadyVerified,
}

/// Raw API response: `{"status": "1", "message": "OK", "result": "..."}`
#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    message: String,
    result: String,
}

/// How a `verifysourcecode` response should be handled
#[derive(Debug, Clone, PartialEq, Eq)]
enum Submission {
    Guid(String),
    AlreadyVerified,
    NotIndexed,
    Rejected(String),
}

/// How a `checkverifystatus` response should be handled
#[derive(Debug, Clone, PartialEq, Eq)]
enum CheckStatus {
    Pending,
    Done(VerificationOutcome),
    Failed(String),
}

fn interpret_submission(response: &ExplorerResponse) -> Submission {
    let result = response.result.as_str();
    if response.status == "1" {
        return Submission::Guid(result.to_string());
    }

    let lower = result.to_lowercase();
    if lower.contains("already verified") {
        Submission::AlreadyVerified
    } else if lower.contains("unable to locate contractcode") {
        Submission::NotIndexed
    } else {
        Submission::Rejected(format!("{}: {}", response.message, result))
    }
}

fn interpret_status(response: &ExplorerResponse) -> CheckStatus {
    let result = response.result.as_str();
    let lower = result.to_lowercase();

    if lower.contains("pending in queue") || lower.contains("in progress") {
        CheckStatus::Pending
    } else if lower.contains("already verified") {
        CheckStatus::Done(VerificationOutcome::AlreadyVerified)
    } else if response.status == "1" && lower.contains("pass") {
        CheckStatus::Done(VerificationOutcome::Verified)
    } else {
        CheckStatus::Failed(result.to_string())
    }
}

/// Etherscan-compatible verification client
pub struct ExplorerVerifier {
    api_url: String,
    api_key: Redacted<String>,
    client: Client,
    poll_interval: Duration,
}

impl ExplorerVerifier {
    /// Create a verifier for an explorer API endpoint
    pub fn new(api_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .wrap_err("Failed to create HTTP client")?;

        Ok(Self {
            api_url: api_url.to_string(),
            api_key: Redacted(api_key.to_string()),
            client,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override the delay between polls
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Submit the source and wait for the explorer's verdict
    pub async fn verify(&self, request: &VerificationRequest) -> Result<VerificationOutcome> {
        info!(
            address = %request.address,
            contract = %request.contract_name,
            compiler = %request.compiler_version,
            api = %self.api_url,
            "Submitting contract for verification"
        );

        let mut attempt = 0;
        let guid = loop {
            attempt += 1;
            match interpret_submission(&self.submit(request).await?) {
                Submission::Guid(guid) => break guid,
                Submission::AlreadyVerified => {
                    info!(address = %request.address, "Contract already verified");
                    return Ok(VerificationOutcome::AlreadyVerified);
                }
                Submission::NotIndexed if attempt < MAX_SUBMIT_ATTEMPTS => {
                    warn!(
                        address = %request.address,
                        attempt,
                        "Explorer has not indexed the bytecode yet, resubmitting"
                    );
                    tokio::time::sleep(self.poll_interval).await;
                }
                Submission::NotIndexed => {
                    return Err(eyre!(
                        "Explorer could not locate bytecode at {} after {} attempts",
                        request.address,
                        attempt
                    ));
                }
                Submission::Rejected(reason) => {
                    return Err(eyre!("Verification submission rejected: {}", reason));
                }
            }
        };

        debug!(guid = %guid, "Verification submitted");

        for _ in 0..MAX_STATUS_POLLS {
            tokio::time::sleep(self.poll_interval).await;

            match interpret_status(&self.check_status(&guid).await?) {
                CheckStatus::Pending => debug!(guid = %guid, "Verification pending"),
                CheckStatus::Done(outcome) => {
                    info!(address = %request.address, outcome = ?outcome, "Contract verified");
                    return Ok(outcome);
                }
                CheckStatus::Failed(reason) => {
                    return Err(eyre!("Verification failed: {}", reason));
                }
            }
        }

        Err(eyre!("Verification of {} still pending, giving up", request.address))
    }

    async fn submit(&self, request: &VerificationRequest) -> Result<ExplorerResponse> {
        let form = self.submission_form(request);

        let response = self
            .client
            .post(&self.api_url)
            .form(&form)
            .send()
            .await
            .wrap_err("Failed to submit verification request")?;

        parse_response(response).await
    }

    async fn check_status(&self, guid: &str) -> Result<ExplorerResponse> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("apikey", self.api_key.expose().as_str()),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await
            .wrap_err("Failed to query verification status")?;

        parse_response(response).await
    }

    fn submission_form(&self, request: &VerificationRequest) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.api_key.expose().clone()),
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("contractaddress", request.address.to_string()),
            ("sourceCode", request.source_code.clone()),
            ("codeformat", "solidity-standard-json-input".to_string()),
            ("contractname", request.contract_name.clone()),
            ("compilerversion", request.compiler_version.clone()),
            // Etherscan's own spelling
            (
                "constructorArguements",
                hex::encode(&request.constructor_args),
            ),
        ]
    }
}

async fn parse_response(response: reqwest::Response) -> Result<ExplorerResponse> {
    if !response.status().is_success() {
        return Err(eyre!(
            "Explorer API returned {}: {}",
            response.status(),
            response.text().await.unwrap_or_default()
        ));
    }

    response
        .json::<ExplorerResponse>()
        .await
        .wrap_err("Invalid explorer API response")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: &str, message: &str, result: &str) -> ExplorerResponse {
        ExplorerResponse {
            status: status.to_string(),
            message: message.to_string(),
            result: result.to_string(),
        }
    }

    #[test]
    fn test_submission_returns_guid() {
        let json = r#"{"status":"1","message":"OK","result":"ezq878u486pzijkvvmerl6a9mzwhv6sefgvqi5tkwceejc7tvn"}"#;
        let parsed: ExplorerResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            interpret_submission(&parsed),
            Submission::Guid("ezq878u486pzijkvvmerl6a9mzwhv6sefgvqi5tkwceejc7tvn".to_string())
        );
    }

    #[test]
    fn test_submission_already_verified() {
        let r = response("0", "NOTOK", "Contract source code already verified");
        assert_eq!(interpret_submission(&r), Submission::AlreadyVerified);
    }

    #[test]
    fn test_submission_not_indexed() {
        let r = response(
            "0",
            "NOTOK",
            "Unable to locate ContractCode at 0x5FbDB2315678afecb367f032d93F642f64180aa3",
        );
        assert_eq!(interpret_submission(&r), Submission::NotIndexed);
    }

    #[test]
    fn test_submission_rejected() {
        let r = response("0", "NOTOK", "Invalid API Key");
        assert_eq!(
            interpret_submission(&r),
            Submission::Rejected("NOTOK: Invalid API Key".to_string())
        );
    }

    #[test]
    fn test_status_decisions() {
        assert_eq!(
            interpret_status(&response("0", "NOTOK", "Pending in queue")),
            CheckStatus::Pending
        );
        assert_eq!(
            interpret_status(&response("1", "OK", "Pass - Verified")),
            CheckStatus::Done(VerificationOutcome::Verified)
        );
        assert_eq!(
            interpret_status(&response("1", "OK", "Already Verified")),
            CheckStatus::Done(VerificationOutcome::AlreadyVerified)
        );
        assert_eq!(
            interpret_status(&response("0", "NOTOK", "Fail - Unable to verify")),
            CheckStatus::Failed("Fail - Unable to verify".to_string())
        );
    }

    #[test]
    fn test_submission_form_fields() {
        let verifier = ExplorerVerifier::new("https://api-sepolia.etherscan.io/api", "KEY").unwrap();
        let request = VerificationRequest {
            address: Address::repeat_byte(0x11),
            contract_name: "contracts/Foo.sol:Foo".to_string(),
            source_code: "{}".to_string(),
            compiler_version: "v0.8.19+commit.7dd6d404".to_string(),
            constructor_args: Bytes::from(vec![0xab, 0xcd]),
        };

        let form = verifier.submission_form(&request);
        let get = |k: &str| {
            form.iter()
                .find(|(key, _)| *key == k)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(get("codeformat"), "solidity-standard-json-input");
        assert_eq!(get("constructorArguements"), "abcd");
        assert_eq!(get("contractname"), "contracts/Foo.sol:Foo");
        assert_eq!(get("apikey"), "KEY");
    }

    #[test]
    fn test_default_explorer_apis() {
        assert_eq!(
            explorer_api_for_chain(11155111),
            Some("https://api-sepolia.etherscan.io/api")
        );
        assert_eq!(
            explorer_api_for_chain(421614),
            Some("https://api-sepolia.arbiscan.io/api")
        );
        assert_eq!(explorer_api_for_chain(31337), None);
    }
}
