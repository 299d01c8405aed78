//! External contract interfaces and the address table.
//!
//! The addresses below belong to third-party deployments; the gateway only
//! ever reads from them or calls them through the [`Ledger`](super::Ledger)
//! seam. Tests build their own [`ContractTable`] with arbitrary addresses.

use std::collections::BTreeMap;

use alloy::primitives::{address, Address};
use alloy::sol;

sol! {
    /// Minimal ERC-20 surface used by the gateway.
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Aave v3 pool.
    #[sol(rpc)]
    interface IPool {
        function supply(address asset, uint256 amount, address onBehalfOf, uint16 referralCode) external;
        function withdraw(address asset, uint256 amount, address to) external returns (uint256);
        function getUserAccountData(address user) external view returns (
            uint256 totalCollateralBase,
            uint256 totalDebtBase,
            uint256 availableBorrowsBase,
            uint256 currentLiquidationThreshold,
            uint256 ltv,
            uint256 healthFactor
        );
    }
}

/// Decimals of the native currency.
pub const NATIVE_DECIMALS: u8 = 18;

/// Decimals of the pool's base currency (USD, 8 decimals on Aave v3).
pub const POOL_BASE_DECIMALS: u8 = 8;

/// Decimals of the deposited stable token.
pub const STABLE_TOKEN_DECIMALS: u8 = 6;

/// Logical role of an external contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractRole {
    RewardToken,
    YieldAggregator,
    LendingPool,
    StableToken,
    CompoundMarket,
    SwapRouter,
    CurvePool,
}

impl ContractRole {
    pub const ALL: [ContractRole; 7] = [
        ContractRole::RewardToken,
        ContractRole::YieldAggregator,
        ContractRole::LendingPool,
        ContractRole::StableToken,
        ContractRole::CompoundMarket,
        ContractRole::SwapRouter,
        ContractRole::CurvePool,
    ];

    /// Key used in the status payload.
    pub fn key(&self) -> &'static str {
        match self {
            ContractRole::RewardToken => "rewardToken",
            ContractRole::YieldAggregator => "yieldAggregator",
            ContractRole::LendingPool => "aavePool",
            ContractRole::StableToken => "aaveUSDC",
            ContractRole::CompoundMarket => "compoundUSDC",
            ContractRole::SwapRouter => "uniswapRouter",
            ContractRole::CurvePool => "curve3Pool",
        }
    }
}

/// Address table keyed by logical role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractTable {
    addresses: BTreeMap<ContractRole, Address>,
    stable_token_decimals: u8,
}

impl ContractTable {
    /// Ethereum mainnet deployments.
    pub fn mainnet() -> Self {
        Self::new(
            [
                (ContractRole::RewardToken, address!("8502496d6739dd6e18ced318c4b5fc12a5fb2c2c")),
                (ContractRole::YieldAggregator, address!("3fa8271e96a29d570f4766aaeabea3aa2df7a9ec")),
                (ContractRole::LendingPool, address!("87870Bca3F3fD6335C3F4ce8392D69350B4fA4E2")),
                (ContractRole::StableToken, address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")),
                (ContractRole::CompoundMarket, address!("c3d688B66703497DAA19211EEdff47f25384cdc3")),
                (ContractRole::SwapRouter, address!("E592427A0AEce92De3Edee1F18E0157C05861564")),
                (ContractRole::CurvePool, address!("bEbc44782C7dB0a1A60Cb6fe97d0b483032FF1C7")),
            ],
            STABLE_TOKEN_DECIMALS,
        )
    }

    /// Build a table from explicit entries.
    ///
    /// Roles missing from `entries` resolve to the zero address.
    pub fn new(
        entries: impl IntoIterator<Item = (ContractRole, Address)>,
        stable_token_decimals: u8,
    ) -> Self {
        Self {
            addresses: entries.into_iter().collect(),
            stable_token_decimals,
        }
    }

    pub fn get(&self, role: ContractRole) -> Address {
        self.addresses.get(&role).copied().unwrap_or(Address::ZERO)
    }

    pub fn lending_pool(&self) -> Address {
        self.get(ContractRole::LendingPool)
    }

    pub fn stable_token(&self) -> Address {
        self.get(ContractRole::StableToken)
    }

    pub fn stable_token_decimals(&self) -> u8 {
        self.stable_token_decimals
    }

    /// All entries, in role order.
    pub fn entries(&self) -> impl Iterator<Item = (ContractRole, Address)> + '_ {
        ContractRole::ALL.iter().map(move |role| (*role, self.get(*role)))
    }
}
