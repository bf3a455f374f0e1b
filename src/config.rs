//! Configuration loader and application settings.

use crate::errors::{AppError, Result};
use crate::price::{DEFAULT_SLIPPAGE_BPS, SlippageTolerance};
use ethers::types::Address;
use std::path::PathBuf;
use url::Url;

/// Polygon WMATIC.
pub const DEFAULT_WMATIC_ADDRESS: &str = "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270";
/// Default ERC-20 the swap tests trade against.
pub const DEFAULT_TOKEN_ADDRESS: &str = "0x5A7BB7B8EFF493625A2bB855445911e63A490E42";

/// Consolidated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON-RPC HTTP endpoint, if any network access is needed.
    pub rpc_url: Option<Url>,
    /// Deployed SimpleSwap contract.
    pub swap_address: Option<Address>,
    /// ERC-20 used as the non-native side of swaps.
    pub token_address: Address,
    /// Wrapped native token.
    pub wmatic_address: Address,
    /// Slippage tolerance in basis points.
    pub slippage_bps: u32,
    /// Root directory holding `artifacts/` and `utils/`.
    pub project_root: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let rpc_url = get("RPC_URL").map(|raw| Url::parse(&raw)).transpose()?;
        let swap_address = get("SIMPLE_SWAP_ADDRESS")
            .map(|raw| parse_address("SIMPLE_SWAP_ADDRESS", &raw))
            .transpose()?;
        let token_address = parse_address(
            "TOKEN_ADDRESS",
            &get("TOKEN_ADDRESS").unwrap_or_else(|| DEFAULT_TOKEN_ADDRESS.into()),
        )?;
        let wmatic_address = parse_address(
            "WMATIC_ADDRESS",
            &get("WMATIC_ADDRESS").unwrap_or_else(|| DEFAULT_WMATIC_ADDRESS.into()),
        )?;
        let slippage_bps = match get("SLIPPAGE_BPS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                AppError::Config(format!("SLIPPAGE_BPS must be an integer: {e}"))
            })?,
            None => DEFAULT_SLIPPAGE_BPS,
        };
        let project_root = get("PROJECT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let cfg = Self {
            rpc_url,
            swap_address,
            token_address,
            wmatic_address,
            slippage_bps,
            project_root,
        };
        // reject out-of-range tolerances at load time
        cfg.slippage()
            .map_err(|e| AppError::Config(format!("SLIPPAGE_BPS: {e}")))?;
        Ok(cfg)
    }

    pub fn slippage(&self) -> Result<SlippageTolerance> {
        SlippageTolerance::from_bps(self.slippage_bps)
    }

    pub fn require_rpc_url(&self) -> Result<&Url> {
        self.rpc_url
            .as_ref()
            .ok_or_else(|| AppError::Config("Set RPC_URL to your node HTTP endpoint".into()))
    }

    pub fn require_swap_address(&self) -> Result<Address> {
        self.swap_address.ok_or_else(|| {
            AppError::Config("Set SIMPLE_SWAP_ADDRESS to the deployed SimpleSwap".into())
        })
    }
}

fn parse_address(key: &str, raw: &str) -> Result<Address> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| AppError::Config(format!("{key} is not a valid address: {e}")))
}
