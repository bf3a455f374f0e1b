use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::One;

/// Human price (token1 per token0) to the raw on-chain ratio.
///
/// raw = human * 10^(dec1 - dec0)
pub fn raw_price_from_human(
    price: &BigDecimal,
    token0_decimals: u8,
    token1_decimals: u8,
) -> BigDecimal {
    price * pow10(i64::from(token1_decimals) - i64::from(token0_decimals))
}

/// Inverse of [`raw_price_from_human`].
pub fn human_price_from_raw(
    raw_price: &BigDecimal,
    token0_decimals: u8,
    token1_decimals: u8,
) -> BigDecimal {
    raw_price * pow10(i64::from(token0_decimals) - i64::from(token1_decimals))
}

/// Raw price encoded by a Q96 square-root value: `(s / 2^96)^2`.
pub fn price_from_sqrt_x96(sqrt_price_x96: &BigUint) -> BigDecimal {
    let numerator = BigDecimal::new(BigInt::from(sqrt_price_x96 * sqrt_price_x96), 0);
    let denominator = BigDecimal::new(BigInt::from(BigUint::one() << 192usize), 0);
    numerator / denominator
}

fn pow10(exp: i64) -> BigDecimal {
    BigDecimal::new(BigInt::one(), -exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlippageDirection;
    use crate::price::{SlippageTolerance, sqrt_price_limit_x96};
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn human_to_raw_weth_usdc() {
        // token0 = WETH (18), token1 = USDC (6): 2500 USDC/ETH -> 2.5e-9 raw
        let raw = raw_price_from_human(&dec("2500"), 18, 6);
        assert_eq!(raw, dec("0.0000000025"));
        assert_eq!(human_price_from_raw(&raw, 18, 6), dec("2500"));
    }

    #[test]
    fn same_decimals_is_identity() {
        assert_eq!(raw_price_from_human(&dec("1.5"), 18, 18), dec("1.5"));
    }

    #[test]
    fn price_of_q96_one_is_one() {
        assert_eq!(price_from_sqrt_x96(&(BigUint::one() << 96usize)), dec("1"));
        assert_eq!(price_from_sqrt_x96(&(BigUint::from(3u32) << 96usize)), dec("9"));
    }

    #[test]
    fn limit_round_trips_within_slippage_band() {
        let tol = SlippageTolerance::default();
        let reference = dec("100");

        let lower = sqrt_price_limit_x96(&reference, SlippageDirection::Lower, &tol).unwrap();
        let back = price_from_sqrt_x96(&lower.to_biguint());
        assert!(back <= dec("90"));
        assert!(back > dec("89.999999999"));

        let higher = sqrt_price_limit_x96(&reference, SlippageDirection::Higher, &tol).unwrap();
        let back = price_from_sqrt_x96(&higher.to_biguint());
        assert!(back <= dec("110"));
        assert!(back > dec("109.999999999"));
    }
}
