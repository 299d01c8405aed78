//! The transaction gateway: one method per endpoint.
//!
//! ```text
//! validate input → call ledger → wait for inclusion → result
//! ```
//!
//! Validation always happens before the first ledger call, so a rejected
//! request never touches the chain.

use std::sync::Arc;

use alloy::primitives::Address;

use crate::blockchain::contracts::{NATIVE_DECIMALS, POOL_BASE_DECIMALS};
use crate::blockchain::{ChainId, ContractTable, Ledger, TxReceipt};
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::projection::{parse_horizon_days, Allocation, Projection};
use crate::gateway::units::{format_decimal, parse_account, to_f64, AmountInput};

/// Minimum deposit, in whole stable-token units.
pub const MIN_DEPOSIT: f64 = 50.0;

/// USD price assumed for the native currency in `totalValueUSD`.
///
/// This is a hard-coded, stale figure and NOT live market data: the total
/// it feeds is an approximation only.
pub const NATIVE_PRICE_USD: f64 = 3450.0;

/// Process-wide resources shared by every request.
#[derive(Clone)]
pub struct GatewayContext {
    /// Connection to the ledger, carrying the signing identity.
    pub ledger: Arc<dyn Ledger>,
    /// External contract addresses.
    pub contracts: ContractTable,
    /// Chain the ledger is expected to serve.
    pub chain_id: ChainId,
}

/// Balances of one account, formatted as decimal strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Balances {
    pub native: String,
    pub stable_token: String,
    pub collateral: String,
    /// Approximate USD value; see [`NATIVE_PRICE_USD`].
    pub total_value_usd: f64,
}

/// A return projection over an explicit horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub predicted_returns: f64,
    pub horizon_days: u32,
}

/// Stateless request translator over an injected [`GatewayContext`].
#[derive(Clone)]
pub struct Gateway {
    context: GatewayContext,
}

impl Gateway {
    pub fn new(context: GatewayContext) -> Self {
        Self { context }
    }

    pub fn contracts(&self) -> &ContractTable {
        &self.context.contracts
    }

    pub fn chain_id(&self) -> ChainId {
        self.context.chain_id
    }

    /// Native, stable-token and collateral balances, read concurrently.
    /// Any failed read fails the whole operation.
    pub async fn get_balances(&self, account: Option<&str>) -> GatewayResult<Balances> {
        let user = parse_account(account)?;
        let ledger = &self.context.ledger;
        let contracts = &self.context.contracts;

        let (native, token, collateral) = tokio::try_join!(
            ledger.native_balance(user),
            ledger.token_balance(contracts.stable_token(), user),
            ledger.collateral_base(contracts.lending_pool(), user),
        )?;

        let token_decimals = contracts.stable_token_decimals();
        let total_value_usd = to_f64(native, NATIVE_DECIMALS) * NATIVE_PRICE_USD
            + to_f64(token, token_decimals)
            + to_f64(collateral, POOL_BASE_DECIMALS);

        Ok(Balances {
            native: format_decimal(native, NATIVE_DECIMALS),
            stable_token: format_decimal(token, token_decimals),
            collateral: format_decimal(collateral, POOL_BASE_DECIMALS),
            total_value_usd,
        })
    }

    /// Approve the pool, then supply on behalf of `account`.
    ///
    /// The supply is only submitted after the approval is confirmed. A failed
    /// supply leaves the approval in place; nothing is rolled back.
    pub async fn deposit(
        &self,
        account: Option<&str>,
        amount: Option<&AmountInput>,
    ) -> GatewayResult<TxReceipt> {
        let user = parse_account(account)?;
        let amount = check_minimum(amount)?;
        let contracts = &self.context.contracts;
        let units = amount.to_base_units(contracts.stable_token_decimals())?;

        let pool = contracts.lending_pool();
        let token = contracts.stable_token();

        tracing::info!(user = %user, amount = %amount.as_decimal(), "Deposit requested");

        let approval = self.context.ledger.approve(token, pool, units).await?;
        tracing::debug!(tx_hash = %approval.transaction_hash, "Pool allowance confirmed");

        let receipt = self
            .context
            .ledger
            .supply(pool, token, units, user)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    user = %user,
                    approval_tx = %approval.transaction_hash,
                    error = %e,
                    "Supply failed after approval; allowance left in place"
                )
            })?;

        Ok(receipt)
    }

    /// Withdraw `amount` from the pool to `account`.
    ///
    /// The amount is only parsed; balance checks are left to the pool.
    pub async fn withdraw(
        &self,
        account: Option<&str>,
        amount: Option<&AmountInput>,
    ) -> GatewayResult<TxReceipt> {
        let user = parse_account(account)?;
        let contracts = &self.context.contracts;
        let units = amount
            .ok_or_else(|| GatewayError::InvalidAmount("amount is required".to_string()))?
            .to_base_units(contracts.stable_token_decimals())?;

        tracing::info!(user = %user, units = %units, "Withdraw requested");

        let receipt = self
            .context
            .ledger
            .withdraw(contracts.lending_pool(), contracts.stable_token(), units, user)
            .await?;

        Ok(receipt)
    }

    /// Fixed-multiplier projection of the account's collateral.
    pub async fn metrics(&self, account: Option<&str>) -> GatewayResult<Projection> {
        let collateral = self.collateral(account).await?;
        Ok(Projection::for_collateral(collateral))
    }

    /// Linear return projection over `days` (default 30).
    pub async fn predict(
        &self,
        account: Option<&str>,
        days: Option<&str>,
    ) -> GatewayResult<Prediction> {
        let collateral = self.collateral(account).await?;
        let horizon_days = parse_horizon_days(days);

        Ok(Prediction {
            predicted_returns: Projection::for_collateral(collateral).over_days(horizon_days),
            horizon_days,
        })
    }

    /// Advisory 40/30/20/10 split of the account's collateral. Submits nothing.
    pub async fn rebalance(&self, account: Option<&str>) -> GatewayResult<Allocation> {
        let collateral = self.collateral(account).await?;
        Ok(Allocation::split(collateral))
    }

    async fn collateral(&self, account: Option<&str>) -> GatewayResult<f64> {
        let user: Address = parse_account(account)?;
        let raw = self
            .context
            .ledger
            .collateral_base(self.context.contracts.lending_pool(), user)
            .await?;
        Ok(to_f64(raw, POOL_BASE_DECIMALS))
    }
}

fn check_minimum(amount: Option<&AmountInput>) -> GatewayResult<&AmountInput> {
    let amount = amount.ok_or_else(|| GatewayError::BelowMinimum {
        minimum: MIN_DEPOSIT,
        received: "nothing".to_string(),
    })?;

    let value = amount.to_f64().ok_or_else(|| {
        GatewayError::InvalidAmount(format!("'{}' is not a number", amount.as_decimal()))
    })?;

    if value < MIN_DEPOSIT {
        return Err(GatewayError::BelowMinimum {
            minimum: MIN_DEPOSIT,
            received: amount.as_decimal(),
        });
    }

    Ok(amount)
}
