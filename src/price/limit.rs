use crate::errors::{AppError, Result};
use crate::models::SlippageDirection;
use alloy_primitives::{U160, U256};
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign, ToBigUint};
use num_traits::{One, Zero};
use std::fmt;
use tracing::debug;
use uniswap_v3_math::tick_math::{MAX_SQRT_RATIO, MIN_SQRT_RATIO, get_tick_at_sqrt_ratio};

/// Fractional bits of the Q96 fixed-point format.
pub const Q96_RESOLUTION: usize = 96;
/// Width of the `sqrtPriceLimitX96` swap parameter (`uint160`).
pub const SQRT_PRICE_LIMIT_BITS: u64 = 160;
/// 10% slippage.
pub const DEFAULT_SLIPPAGE_BPS: u32 = 1_000;

const BPS_SCALE: i64 = 4; // 1 bps = 10^-4

/// Slippage tolerance as a fraction strictly between 0 and 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlippageTolerance(BigDecimal);

impl SlippageTolerance {
    /// Build from basis points (1000 = 10%).
    pub fn from_bps(bps: u32) -> Result<Self> {
        Self::from_fraction(BigDecimal::new(BigInt::from(bps), BPS_SCALE))
    }

    /// Build from a decimal fraction such as `0.1`.
    pub fn from_fraction(fraction: BigDecimal) -> Result<Self> {
        if fraction <= BigDecimal::zero() || fraction >= BigDecimal::one() {
            return Err(AppError::InvalidInput(format!(
                "slippage tolerance must be in (0, 1), got {fraction}"
            )));
        }
        Ok(Self(fraction))
    }

    pub fn fraction(&self) -> &BigDecimal {
        &self.0
    }

    /// `price * (1 - t)` for [`SlippageDirection::Lower`], `price * (1 + t)` for
    /// [`SlippageDirection::Higher`]. Exact decimal arithmetic.
    pub fn adjust(&self, price: &BigDecimal, direction: SlippageDirection) -> BigDecimal {
        let factor = match direction {
            SlippageDirection::Lower => BigDecimal::one() - &self.0,
            SlippageDirection::Higher => BigDecimal::one() + &self.0,
        };
        price * factor
    }
}

impl Default for SlippageTolerance {
    fn default() -> Self {
        Self(BigDecimal::new(BigInt::from(DEFAULT_SLIPPAGE_BPS), BPS_SCALE))
    }
}

impl fmt::Display for SlippageTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = &self.0 * BigDecimal::from(100u32);
        write!(f, "{}%", percent.with_scale(2))
    }
}

/// `sqrt(price) * 2^96` truncated to an integer that fits a `uint160`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SqrtPriceLimitX96(U160);

impl SqrtPriceLimitX96 {
    pub fn try_from_biguint(value: &BigUint) -> Result<Self> {
        let bits = value.bits();
        if bits > SQRT_PRICE_LIMIT_BITS {
            return Err(AppError::Overflow {
                bits,
                max_bits: SQRT_PRICE_LIMIT_BITS,
            });
        }
        U160::try_from_be_slice(&value.to_bytes_be())
            .map(Self)
            .ok_or(AppError::Overflow {
                bits,
                max_bits: SQRT_PRICE_LIMIT_BITS,
            })
    }

    pub fn as_u160(&self) -> U160 {
        self.0
    }

    pub fn to_u256(&self) -> U256 {
        U256::from_be_slice(&self.0.to_be_bytes::<20>())
    }

    /// Same value as an `ethers` word, ready for abigen call builders.
    pub fn to_ethers(&self) -> ethers::types::U256 {
        ethers::types::U256::from_big_endian(&self.0.to_be_bytes::<20>())
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0.to_be_bytes::<20>())
    }

    /// Pull the limit into the open range `(MIN_SQRT_RATIO, MAX_SQRT_RATIO)`
    /// that V3 pools accept for `sqrtPriceLimitX96`.
    pub fn clamp_to_tick_range(self) -> Self {
        let lo = MIN_SQRT_RATIO + U256::from(1u8);
        let hi = MAX_SQRT_RATIO - U256::from(1u8);
        let clamped = self.to_u256().clamp(lo, hi);
        // MAX_SQRT_RATIO < 2^160, so the top 12 bytes are zero
        Self(U160::from_be_slice(&clamped.to_be_bytes::<32>()[12..]))
    }

    /// Greatest tick whose sqrt ratio is <= this limit.
    pub fn tick(&self) -> Result<i32> {
        Ok(get_tick_at_sqrt_ratio(self.to_u256())?)
    }
}

impl fmt::Display for SqrtPriceLimitX96 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// `floor(sqrt(x) * 2^96)` for a non-negative decimal `x`.
///
/// Computed as `isqrt(floor(x * 2^192))`, which is exact because
/// `floor(sqrt(y)) == isqrt(floor(y))` for any real `y >= 0`.
///
/// The size of the radicand is bounded from the mantissa width and the decimal
/// exponent before any power of ten is built, so results wider than
/// [`SQRT_PRICE_LIMIT_BITS`] fail with `Overflow` and values that truncate to
/// zero return zero without ever expanding the exponent.
pub fn isqrt_scaled(x: &BigDecimal) -> Result<BigUint> {
    let (mantissa, scale) = x.as_bigint_and_exponent();
    let mantissa = mantissa
        .to_biguint()
        .ok_or_else(|| AppError::InvalidInput("cannot take sqrt of a negative value".into()))?;
    if mantissa.is_zero() {
        return Ok(BigUint::zero());
    }

    // mantissa * 2^192 lies in [2^(shifted_bits - 1), 2^shifted_bits)
    let shifted_bits = mantissa.bits() + 2 * Q96_RESOLUTION as u64;
    let max_radicand_bits = 2 * SQRT_PRICE_LIMIT_BITS;
    let digits = scale.unsigned_abs();

    if scale >= 0 {
        // 10^d >= 2^(3d): the quotient is zero once 3d >= shifted_bits
        if digits.saturating_mul(3) >= shifted_bits {
            return Ok(BigUint::zero());
        }
    } else {
        // radicand >= 2^(shifted_bits - 1 + 3d); at 2^320 the root needs 161 bits
        let low_bits = (shifted_bits - 1).saturating_add(digits.saturating_mul(3));
        if low_bits >= max_radicand_bits {
            return Err(AppError::Overflow {
                bits: low_bits / 2 + 1,
                max_bits: SQRT_PRICE_LIMIT_BITS,
            });
        }
    }

    let exponent = u32::try_from(digits)
        .map_err(|_| AppError::InvalidInput(format!("decimal exponent out of range: {scale}")))?;
    let pow10 = BigUint::from(10u32).pow(exponent);
    let shifted = mantissa << (2 * Q96_RESOLUTION);
    let radicand = if scale >= 0 {
        shifted / pow10
    } else {
        shifted * pow10
    };

    let radicand_bits = radicand.bits();
    if radicand_bits > max_radicand_bits {
        return Err(AppError::Overflow {
            bits: radicand_bits.div_ceil(2),
            max_bits: SQRT_PRICE_LIMIT_BITS,
        });
    }
    Ok(radicand.sqrt())
}

/// Square-root price limit for a swap around `reference_price`.
///
/// `reference_price` is the raw ratio (token1 raw units per token0 raw unit);
/// see [`super::raw_price_from_human`] for converting a display price.
///
/// # Errors
/// * `InvalidInput` if `reference_price <= 0`, or if the adjusted price is too
///   small to be represented (the Q96 value truncates to zero).
/// * `Overflow` if the result does not fit in 160 bits.
pub fn sqrt_price_limit_x96(
    reference_price: &BigDecimal,
    direction: SlippageDirection,
    tolerance: &SlippageTolerance,
) -> Result<SqrtPriceLimitX96> {
    if reference_price.sign() != Sign::Plus {
        return Err(AppError::InvalidInput(
            "reference price must be positive".into(),
        ));
    }

    let adjusted = tolerance.adjust(reference_price, direction);
    let scaled = isqrt_scaled(&adjusted)?;
    if scaled.is_zero() {
        return Err(AppError::InvalidInput(
            "adjusted price is below Q96 resolution".into(),
        ));
    }
    let limit = SqrtPriceLimitX96::try_from_biguint(&scaled)?;

    debug!(
        %reference_price,
        %adjusted,
        ?direction,
        %limit,
        "[LIMIT] sqrt price limit computed"
    );
    Ok(limit)
}
