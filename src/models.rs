//! Shared data structures used throughout the application.

use ethers::types::{I256, U256};

/// Side of the reference price the swap limit should sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlippageDirection {
    /// Limit below the reference price (price moves down during the swap).
    Lower,
    /// Limit above the reference price (price moves up during the swap).
    Higher,
}

impl SlippageDirection {
    /// Whether the bounded swap sells token0 for token1.
    ///
    /// Selling token0 pushes √P down, so it needs a limit below the current price.
    pub fn zero_for_one(self) -> bool {
        matches!(self, SlippageDirection::Lower)
    }
}

/// Uniswap V3 fee tier as understood by the SimpleSwap contract (`uint8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum FeeTier {
    #[default]
    Low = 0,
    Mid = 1,
    High = 2,
}

impl FeeTier {
    /// Pool fee in hundredths of a bip (500 = 0.05%).
    pub fn pool_fee(self) -> u32 {
        match self {
            FeeTier::Low => 500,
            FeeTier::Mid => 3_000,
            FeeTier::High => 10_000,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Balances of one account at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceSnapshot {
    /// Native coin (MATIC) in wei.
    pub native: U256,
    /// Test token balance in raw units.
    pub token: U256,
    /// Wrapped native token balance in raw units.
    pub wrapped: U256,
}

/// Signed change between two snapshots (`after - before`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceDelta {
    pub native: I256,
    pub token: I256,
    pub wrapped: I256,
}

impl BalanceSnapshot {
    pub fn delta_to(&self, after: &BalanceSnapshot) -> BalanceDelta {
        BalanceDelta {
            native: I256::from_raw(after.native) - I256::from_raw(self.native),
            token: I256::from_raw(after.token) - I256::from_raw(self.token),
            wrapped: I256::from_raw(after.wrapped) - I256::from_raw(self.wrapped),
        }
    }
}

impl BalanceDelta {
    /// Native coin that left the account, or zero if the balance grew.
    pub fn native_spent(&self) -> U256 {
        if self.native.is_negative() {
            self.native.unsigned_abs()
        } else {
            U256::zero()
        }
    }

    /// Native coin that arrived in the account, or zero if the balance shrank.
    pub fn native_received(&self) -> U256 {
        if self.native.is_positive() {
            self.native.into_raw()
        } else {
            U256::zero()
        }
    }
}
