//! Loading compiled contract artifacts from a Hardhat project tree.
//!
//! Layout under the project root:
//! * `artifacts/contracts/<Name>.sol/<Name>.json`: `{ "abi": [...], "bytecode": "0x..." }`
//! * `utils/WrappedToken.json`: bare ERC-20 ABI array

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use ethers::abi::Abi;
use ethers::types::{Bytes, TransactionRequest};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const ARTIFACTS_DIR: &str = "artifacts";
const CONTRACTS_DIR: &str = "contracts";
const UTILS_DIR: &str = "utils";
const TOKEN_ABI_FILE: &str = "WrappedToken.json";

/// Contracts compiled by this project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    SimpleSwap,
}

impl ContractKind {
    /// Solidity contract name, also the artifact file stem.
    pub fn name(self) -> &'static str {
        match self {
            ContractKind::SimpleSwap => "SimpleSwap",
        }
    }
}

/// ABI and creation bytecode of one compiled contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractArtifact {
    pub abi: Abi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Unsigned creation transaction for a contract without constructor args.
    pub fn deployment_tx(&self) -> Result<TransactionRequest> {
        if self.bytecode.is_empty() {
            return Err(AppError::InvalidInput(
                "artifact has no creation bytecode (abstract contract or interface)".into(),
            ));
        }
        Ok(TransactionRequest::new().data(self.bytecode.clone()))
    }

    /// Names of the ABI functions, sorted.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.abi.functions().map(|f| f.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// Read-only view over a project's build output. Nothing is cached.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(cfg.project_root.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contract_path(&self, kind: ContractKind) -> PathBuf {
        let name = kind.name();
        self.root
            .join(ARTIFACTS_DIR)
            .join(CONTRACTS_DIR)
            .join(format!("{name}.sol"))
            .join(format!("{name}.json"))
    }

    pub fn token_abi_path(&self) -> PathBuf {
        self.root.join(UTILS_DIR).join(TOKEN_ABI_FILE)
    }

    pub fn load(&self, kind: ContractKind) -> Result<ContractArtifact> {
        let path = self.contract_path(kind);
        debug!(path = %path.display(), "[ARTIFACT] loading contract artifact");
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn token_abi(&self) -> Result<Abi> {
        let path = self.token_abi_path();
        debug!(path = %path.display(), "[ARTIFACT] loading token ABI");
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
