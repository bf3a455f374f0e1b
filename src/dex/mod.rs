//! SimpleSwap contract integration: request checks, read calls and unsigned
//! transaction builders.

pub mod client;
pub mod request;

pub use client::{
    Deployment, POLYGON_QUOTER, POLYGON_SWAP_ROUTER, POLYGON_WMATIC, SWAP_GAS_LIMIT, SwapClient,
};
pub use request::{INVALID_AMOUNT_IN, SwapRequest};
