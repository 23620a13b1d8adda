//! Hardhat artifact loading
//!
//! Contracts are compiled with Hardhat; deployment reads the bytecode from
//! `artifacts/<source>/<Name>.json` and verification reads the compiler
//! input from the build-info file that `<Name>.dbg.json` points at.

use alloy::primitives::Bytes;
use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Compiled contract artifact (`hh-sol-artifact-1` format)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardhatArtifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: serde_json::Value,
    pub bytecode: Bytes,
    #[serde(skip)]
    pub path: PathBuf,
}

/// Debug file next to each artifact
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    build_info: String,
}

/// Compiler run that produced an artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// Full compiler version, e.g. `0.8.19+commit.7dd6d404`
    pub solc_long_version: String,
    /// Standard-JSON compiler input
    pub input: serde_json::Value,
}

impl BuildInfo {
    /// Compiler version in the `v0.8.19+commit.7dd6d404` form explorers expect
    pub fn compiler_version(&self) -> String {
        format!("v{}", self.solc_long_version.trim_start_matches('v'))
    }

    /// Standard-JSON input serialized for submission
    pub fn standard_json_input(&self) -> Result<String> {
        serde_json::to_string(&self.input).wrap_err("Failed to serialize compiler input")
    }
}

impl HardhatArtifact {
    /// Parse an artifact file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read artifact {}", path.display()))?;
        let mut artifact: HardhatArtifact = serde_json::from_str(&content)
            .wrap_err_with(|| format!("Invalid artifact {}", path.display()))?;
        artifact.path = path.to_path_buf();
        Ok(artifact)
    }

    /// Find `<contract_name>.json` anywhere under `artifacts_dir`
    pub fn find(artifacts_dir: &Path, contract_name: &str) -> Result<Self> {
        let file_name = format!("{}.json", contract_name);
        let path = find_file(artifacts_dir, &file_name)?.ok_or_else(|| {
            eyre!(
                "Artifact {} not found under {} (run `npx hardhat compile` first)",
                file_name,
                artifacts_dir.display()
            )
        })?;

        debug!(path = %path.display(), "Found artifact");
        Self::from_file(&path)
    }

    /// Fully qualified name used by explorers, e.g. `contracts/Foo.sol:Foo`
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Load the build-info referenced by this artifact's `.dbg.json`
    pub fn build_info(&self) -> Result<BuildInfo> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| eyre!("Artifact path has no parent: {}", self.path.display()))?;
        let dbg_path = dir.join(format!("{}.dbg.json", self.contract_name));

        let dbg: DebugFile = serde_json::from_str(
            &fs::read_to_string(&dbg_path)
                .wrap_err_with(|| format!("Failed to read {}", dbg_path.display()))?,
        )
        .wrap_err_with(|| format!("Invalid debug file {}", dbg_path.display()))?;

        let build_info_path = dir.join(&dbg.build_info);
        let content = fs::read_to_string(&build_info_path)
            .wrap_err_with(|| format!("Failed to read {}", build_info_path.display()))?;
        serde_json::from_str(&content)
            .wrap_err_with(|| format!("Invalid build info {}", build_info_path.display()))
    }
}

fn find_file(dir: &Path, file_name: &str) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    for entry in fs::read_dir(dir).wrap_err_with(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            // build-info holds compiler runs, not artifacts
            if path.file_name().is_some_and(|n| n == "build-info") {
                continue;
            }
            if let Some(found) = find_file(&path, file_name)? {
                return Ok(Some(found));
            }
        } else if path.file_name().is_some_and(|n| n == file_name) {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(root: &Path) {
        let contract_dir = root.join("contracts/Greeter.sol");
        let build_dir = root.join("build-info");
        fs::create_dir_all(&contract_dir).unwrap();
        fs::create_dir_all(&build_dir).unwrap();

        fs::write(
            contract_dir.join("Greeter.json"),
            r#"{
                "_format": "hh-sol-artifact-1",
                "contractName": "Greeter",
                "sourceName": "contracts/Greeter.sol",
                "abi": [],
                "bytecode": "0x6080604052",
                "deployedBytecode": "0x",
                "linkReferences": {},
                "deployedLinkReferences": {}
            }"#,
        )
        .unwrap();
        fs::write(
            contract_dir.join("Greeter.dbg.json"),
            r#"{"_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/abc123.json"}"#,
        )
        .unwrap();
        fs::write(
            build_dir.join("abc123.json"),
            r#"{
                "id": "abc123",
                "solcVersion": "0.8.19",
                "solcLongVersion": "0.8.19+commit.7dd6d404",
                "input": {"language": "Solidity", "sources": {}}
            }"#,
        )
        .unwrap();
    }

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "crosslayer-artifact-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_find_and_parse_artifact() {
        let root = fixture_dir("find");
        write_fixture(&root);

        let artifact = HardhatArtifact::find(&root, "Greeter").unwrap();
        assert_eq!(artifact.contract_name, "Greeter");
        assert_eq!(artifact.fully_qualified_name(), "contracts/Greeter.sol:Greeter");
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_build_info_via_dbg_file() {
        let root = fixture_dir("buildinfo");
        write_fixture(&root);

        let artifact = HardhatArtifact::find(&root, "Greeter").unwrap();
        let build_info = artifact.build_info().unwrap();
        assert_eq!(build_info.compiler_version(), "v0.8.19+commit.7dd6d404");
        assert!(build_info
            .standard_json_input()
            .unwrap()
            .contains("\"language\":\"Solidity\""));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_missing_artifact() {
        let root = fixture_dir("missing");
        write_fixture(&root);

        let err = HardhatArtifact::find(&root, "Nope").unwrap_err();
        assert!(err.to_string().contains("Nope.json"));

        let _ = fs::remove_dir_all(&root);
    }
}
