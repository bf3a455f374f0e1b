//! Command-line interface.

use crate::artifacts::{ArtifactStore, ContractKind};
use crate::config::AppConfig;
use crate::dex::{Deployment, SwapClient};
use crate::models::SlippageDirection;
use crate::price::{
    SlippageTolerance, SqrtPriceLimitX96, price_from_sqrt_x96, raw_price_from_human,
    sqrt_price_limit_x96,
};
use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "simple-swap-kit", version, about = "SimpleSwap price limits and contract checks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute a sqrtPriceLimitX96 for a reference price.
    Limit(LimitArgs),
    /// Load a compiled artifact and summarize it.
    Artifact {
        #[arg(long, value_enum, default_value_t = ContractArg::SimpleSwap)]
        contract: ContractArg,
    },
    /// Read the deployed SimpleSwap's external addresses and check them.
    Inspect,
}

#[derive(Debug, Args)]
pub struct LimitArgs {
    /// Reference price (raw ratio, or human price with --decimals0/--decimals1).
    #[arg(long, allow_hyphen_values = true)]
    pub price: String,
    #[arg(long, value_enum)]
    pub direction: DirectionArg,
    /// Overrides SLIPPAGE_BPS.
    #[arg(long)]
    pub slippage_bps: Option<u32>,
    #[arg(long, requires = "decimals1")]
    pub decimals0: Option<u8>,
    #[arg(long, requires = "decimals0")]
    pub decimals1: Option<u8>,
    /// Clamp into the range V3 pools accept.
    #[arg(long)]
    pub clamp: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Lower,
    Higher,
}

impl From<DirectionArg> for SlippageDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Lower => SlippageDirection::Lower,
            DirectionArg::Higher => SlippageDirection::Higher,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContractArg {
    SimpleSwap,
}

impl From<ContractArg> for ContractKind {
    fn from(arg: ContractArg) -> Self {
        match arg {
            ContractArg::SimpleSwap => ContractKind::SimpleSwap,
        }
    }
}

/// Result of the `limit` command.
#[derive(Debug, Clone)]
pub struct LimitReport {
    pub raw_price: BigDecimal,
    pub tolerance: SlippageTolerance,
    pub limit: SqrtPriceLimitX96,
    /// `None` when the limit lies outside the pool tick range.
    pub tick: Option<i32>,
    /// Raw price the limit encodes.
    pub limit_price: BigDecimal,
}

pub fn run_limit(args: &LimitArgs, cfg: &AppConfig) -> Result<LimitReport> {
    let price = BigDecimal::from_str(args.price.trim())
        .with_context(|| format!("invalid price {:?}", args.price))?;
    let raw_price = match (args.decimals0, args.decimals1) {
        (Some(d0), Some(d1)) => raw_price_from_human(&price, d0, d1),
        _ => price,
    };
    let tolerance = match args.slippage_bps {
        Some(bps) => SlippageTolerance::from_bps(bps)?,
        None => cfg.slippage()?,
    };

    let mut limit = sqrt_price_limit_x96(&raw_price, args.direction.into(), &tolerance)?;
    if args.clamp {
        limit = limit.clamp_to_tick_range();
    }
    let tick = match limit.tick() {
        Ok(t) => Some(t),
        Err(e) => {
            warn!(error = %e, "[LIMIT] limit is outside the pool tick range, use --clamp");
            None
        }
    };
    let limit_price = price_from_sqrt_x96(&limit.to_biguint());

    info!(
        %raw_price,
        %tolerance,
        direction = ?args.direction,
        %limit,
        ?tick,
        "[LIMIT] computed"
    );
    Ok(LimitReport {
        raw_price,
        tolerance,
        limit,
        tick,
        limit_price,
    })
}

/// Summary of a loaded artifact.
#[derive(Debug, Clone)]
pub struct ArtifactReport {
    pub functions: Vec<String>,
    pub bytecode_len: usize,
}

pub fn run_artifact(contract: ContractArg, cfg: &AppConfig) -> Result<ArtifactReport> {
    let store = ArtifactStore::from_config(cfg);
    let kind: ContractKind = contract.into();
    let artifact = store
        .load(kind)
        .with_context(|| format!("loading {}", store.contract_path(kind).display()))?;
    let report = ArtifactReport {
        functions: artifact
            .function_names()
            .into_iter()
            .map(str::to_owned)
            .collect(),
        bytecode_len: artifact.bytecode.len(),
    };
    info!(
        contract = kind.name(),
        functions = report.functions.len(),
        bytecode_len = report.bytecode_len,
        "[ARTIFACT] loaded"
    );
    Ok(report)
}

pub async fn run_inspect(cfg: &AppConfig) -> Result<Deployment> {
    let rpc_url = cfg.require_rpc_url()?;
    let client = SwapClient::new(
        rpc_url.as_str(),
        cfg.require_swap_address()?,
        cfg.token_address,
        cfg.wmatic_address,
    )
    .await?;
    let deployment = client.deployment().await?;
    info!(
        swap_router = ?deployment.swap_router,
        quoter = ?deployment.quoter,
        wmatic = ?deployment.wmatic,
        "[DEX] deployment"
    );
    deployment.verify_against(&Deployment::polygon()?)?;
    Ok(deployment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AppConfig {
        AppConfig::from_lookup(|_| None).unwrap()
    }

    fn limit_args(argv: &[&str]) -> LimitArgs {
        let mut full = vec!["simple-swap-kit", "limit"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Limit(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_limit_command() {
        let args = limit_args(&["--price", "100", "--direction", "lower"]);
        assert_eq!(args.price, "100");
        assert_eq!(args.direction, DirectionArg::Lower);
        assert!(args.slippage_bps.is_none());
        assert!(!args.clamp);
    }

    #[test]
    fn decimals_must_come_in_pairs() {
        let res = Cli::try_parse_from([
            "simple-swap-kit",
            "limit",
            "--price",
            "1",
            "--direction",
            "higher",
            "--decimals0",
            "18",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn limit_uses_config_tolerance_by_default() {
        let report = run_limit(&limit_args(&["--price", "100", "--direction", "higher"]), &cfg())
            .unwrap();
        assert_eq!(report.tolerance, SlippageTolerance::default());
        assert!(report.limit_price <= BigDecimal::from(110u32));
        assert!(report.tick.is_some());
    }

    #[test]
    fn limit_applies_decimals_and_override() {
        let report = run_limit(
            &limit_args(&[
                "--price",
                "2500",
                "--direction",
                "lower",
                "--slippage-bps",
                "50",
                "--decimals0",
                "18",
                "--decimals1",
                "6",
            ]),
            &cfg(),
        )
        .unwrap();
        assert_eq!(report.raw_price, BigDecimal::from_str("0.0000000025").unwrap());
        assert_eq!(report.tolerance, SlippageTolerance::from_bps(50).unwrap());
        assert!(report.tick.unwrap() < 0);
    }

    #[test]
    fn limit_rejects_bad_price() {
        assert!(run_limit(&limit_args(&["--price", "abc", "--direction", "lower"]), &cfg()).is_err());
        assert!(run_limit(&limit_args(&["--price", "-1", "--direction", "lower"]), &cfg()).is_err());
    }

    #[test]
    fn clamp_flag_brings_tick_into_range() {
        let report = run_limit(
            &limit_args(&["--price", "1e-40", "--direction", "lower", "--clamp"]),
            &cfg(),
        )
        .unwrap();
        assert!(report.tick.is_some());
    }
}
