use crate::dex::request::SwapRequest;
use crate::errors::{AppError, Result};
use crate::models::BalanceSnapshot;
use ethers::{
    contract::abigen,
    providers::{Http, Middleware, Provider},
    types::{Address, U256, transaction::eip2718::TypedTransaction},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Uniswap V3 SwapRouter on Polygon.
pub const POLYGON_SWAP_ROUTER: &str = "0xE592427A0AEce92De3Edee1F18E0157C05861564";
/// Uniswap V3 QuoterV2 on Polygon.
pub const POLYGON_QUOTER: &str = "0x61fFE014bA17989E743c5F6cB21bF9697530B21e";
/// Polygon WMATIC.
pub const POLYGON_WMATIC: &str = crate::config::DEFAULT_WMATIC_ADDRESS;

/// Gas limit the swap entry points are sent with.
pub const SWAP_GAS_LIMIT: u64 = 500_000;

abigen!(
    SimpleSwapContract,
    r"[
        function swapRouter() view returns (address)
        function quoter() view returns (address)
        function wmatic() view returns (address)
        function swapMaticToToken((address,address,uint256,uint8) req) payable
        function swapTokenToMatic((address,address,uint256,uint8) req)
    ]",
);

abigen!(
    Erc20Token,
    r"[
        function balanceOf(address owner) view returns (uint256)
        function allowance(address owner, address spender) view returns (uint256)
        function approve(address spender, uint256 amount) returns (bool)
    ]",
);

/// External addresses a SimpleSwap deployment was constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub swap_router: Address,
    pub quoter: Address,
    pub wmatic: Address,
}

impl Deployment {
    /// Addresses expected for a Polygon mainnet (or fork) deployment.
    pub fn polygon() -> Result<Self> {
        Ok(Self {
            swap_router: parse_known(POLYGON_SWAP_ROUTER)?,
            quoter: parse_known(POLYGON_QUOTER)?,
            wmatic: parse_known(POLYGON_WMATIC)?,
        })
    }

    pub fn verify_against(&self, expected: &Deployment) -> Result<()> {
        let mut mismatches = Vec::new();
        for (name, got, want) in [
            ("swapRouter", self.swap_router, expected.swap_router),
            ("quoter", self.quoter, expected.quoter),
            ("wmatic", self.wmatic, expected.wmatic),
        ] {
            if got != want {
                mismatches.push(format!("{name}: got {got:?}, expected {want:?}"));
            }
        }
        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "deployment mismatch: {}",
                mismatches.join("; ")
            )))
        }
    }
}

fn parse_known(raw: &str) -> Result<Address> {
    raw.parse()
        .map_err(|e| AppError::Other(format!("bad built-in address {raw}: {e}")))
}

/// Handle for a deployed SimpleSwap plus the two tokens it trades.
#[derive(Clone)]
pub struct SwapClient {
    provider: Arc<Provider<Http>>,
    swap: SimpleSwapContract<Provider<Http>>,
    token: Erc20Token<Provider<Http>>,
    wrapped: Erc20Token<Provider<Http>>,
}

impl SwapClient {
    pub async fn new(
        rpc_url: &str,
        swap_address: Address,
        token_address: Address,
        wrapped_address: Address,
    ) -> Result<Self> {
        let client = Self::new_unchecked(rpc_url, swap_address, token_address, wrapped_address)?;
        client.swap.wmatic().call().await?; // sanity-check
        info!(swap = ?swap_address, "[DEX] connected to SimpleSwap");
        Ok(client)
    }

    /// Build without touching the network.
    pub fn new_unchecked(
        rpc_url: &str,
        swap_address: Address,
        token_address: Address,
        wrapped_address: Address,
    ) -> Result<Self> {
        let provider = Arc::new(Provider::<Http>::try_from(rpc_url)?);
        Ok(Self {
            swap: SimpleSwapContract::new(swap_address, provider.clone()),
            token: Erc20Token::new(token_address, provider.clone()),
            wrapped: Erc20Token::new(wrapped_address, provider.clone()),
            provider,
        })
    }

    pub fn swap_address(&self) -> Address {
        self.swap.address()
    }

    pub async fn deployment(&self) -> Result<Deployment> {
        Ok(Deployment {
            swap_router: self.swap.swap_router().call().await?,
            quoter: self.swap.quoter().call().await?,
            wmatic: self.swap.wmatic().call().await?,
        })
    }

    /// Native, token and wrapped balances of `user` at the latest block.
    pub async fn snapshot(&self, user: Address) -> Result<BalanceSnapshot> {
        let native = self.provider.get_balance(user, None).await?;
        let token = self.token.balance_of(user).call().await?;
        let wrapped = self.wrapped.balance_of(user).call().await?;
        debug!(?user, %native, %token, %wrapped, "[DEX] balance snapshot");
        Ok(BalanceSnapshot {
            native,
            token,
            wrapped,
        })
    }

    /// Fails unless `owner` has approved the swap contract for `req.amount_in`.
    pub async fn check_token_allowance(&self, owner: Address, req: &SwapRequest) -> Result<U256> {
        let allowance = self
            .token
            .allowance(owner, self.swap.address())
            .call()
            .await?;
        if allowance < req.amount_in {
            return Err(AppError::InvalidInput(format!(
                "allowance {allowance} is below amountIn {}",
                req.amount_in
            )));
        }
        Ok(allowance)
    }

    /// Unsigned `swapMaticToToken` carrying `value` wei.
    pub fn swap_matic_to_token_tx(&self, req: &SwapRequest, value: U256) -> Result<TypedTransaction> {
        req.check_native_value(value)?;
        let call = self
            .swap
            .swap_matic_to_token(req.as_tuple())
            .value(value)
            .gas(SWAP_GAS_LIMIT);
        Ok(call.tx)
    }

    /// Unsigned `swapTokenToMatic`; the caller must have approved `amount_in` first.
    pub fn swap_token_to_matic_tx(&self, req: &SwapRequest) -> Result<TypedTransaction> {
        req.check_token_amount()?;
        let call = self
            .swap
            .swap_token_to_matic(req.as_tuple())
            .gas(SWAP_GAS_LIMIT);
        Ok(call.tx)
    }

    /// Unsigned ERC-20 `approve(swap, amount)` on the traded token.
    pub fn approve_tx(&self, amount: U256) -> TypedTransaction {
        self.token.approve(self.swap.address(), amount).tx
    }
}
