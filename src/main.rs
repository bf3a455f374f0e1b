use anyhow::Result;
use clap::Parser;
use simple_swap_kit::{
    cli::{self, Cli, Command},
    config::AppConfig,
    utils,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let args = Cli::parse();
    let cfg = AppConfig::load()?;
    tracing::debug!(?cfg, "[INIT] configuration loaded");

    match args.command {
        Command::Limit(limit_args) => {
            let report = cli::run_limit(&limit_args, &cfg)?;
            println!("sqrtPriceLimitX96: {}", report.limit);
            println!("limit price (raw): {}", report.limit_price);
            match report.tick {
                Some(tick) => println!("tick: {tick}"),
                None => println!("tick: out of range"),
            }
        }
        Command::Artifact { contract } => {
            let report = cli::run_artifact(contract, &cfg)?;
            println!("bytecode: {} bytes", report.bytecode_len);
            for name in report.functions {
                println!("fn {name}");
            }
        }
        Command::Inspect => {
            let deployment = cli::run_inspect(&cfg).await?;
            println!("swapRouter: {:?}", deployment.swap_router);
            println!("quoter:     {:?}", deployment.quoter);
            println!("wmatic:     {:?}", deployment.wmatic);
            println!("deployment matches Polygon addresses");
        }
    }
    Ok(())
}
