//! Q96 square-root price limits for bounding Uniswap V3 style swaps.

pub mod convert;
pub mod limit;

pub use convert::{human_price_from_raw, price_from_sqrt_x96, raw_price_from_human};
pub use limit::{
    DEFAULT_SLIPPAGE_BPS, SQRT_PRICE_LIMIT_BITS, SlippageTolerance, SqrtPriceLimitX96,
    isqrt_scaled, sqrt_price_limit_x96,
};
