use crate::errors::{AppError, Result};
use crate::models::FeeTier;
use ethers::types::{Address, U256};

/// Revert reason the SimpleSwap contract uses for bad input amounts.
pub const INVALID_AMOUNT_IN: &str = "invalid amountIn";

/// Argument of `swapMaticToToken` / `swapTokenToMatic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRequest {
    /// Wrapped native token.
    pub token0: Address,
    /// Token bought or sold against the native coin.
    pub token1: Address,
    pub amount_in: U256,
    pub fee_tier: FeeTier,
}

impl SwapRequest {
    pub fn new(token0: Address, token1: Address, amount_in: U256, fee_tier: FeeTier) -> Self {
        Self {
            token0,
            token1,
            amount_in,
            fee_tier,
        }
    }

    /// Same checks the contract applies to a native-in swap: the amount is
    /// non-zero and exactly matches the attached value.
    pub fn check_native_value(&self, value: U256) -> Result<()> {
        if self.amount_in.is_zero() || value != self.amount_in {
            return Err(AppError::InvalidInput(INVALID_AMOUNT_IN.into()));
        }
        Ok(())
    }

    pub fn check_token_amount(&self) -> Result<()> {
        if self.amount_in.is_zero() {
            return Err(AppError::InvalidInput(INVALID_AMOUNT_IN.into()));
        }
        Ok(())
    }

    /// ABI tuple `(address,address,uint256,uint8)`.
    pub fn as_tuple(&self) -> (Address, Address, U256, u8) {
        (
            self.token0,
            self.token1,
            self.amount_in,
            self.fee_tier.as_u8(),
        )
    }
}
