//! Tooling around a deployed SimpleSwap contract.
//!
//! The core is [`price::sqrt_price_limit_x96`], which turns a reference price
//! and a slippage direction into a Q96 `sqrtPriceLimitX96`. The remaining
//! modules load build artifacts and talk to the contract.

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod dex;
pub mod errors;
pub mod models;
pub mod price;
pub mod utils;

pub use errors::{AppError, Result};
