//! The ledger capability seam.
//!
//! Everything the gateway needs from the chain goes through [`Ledger`].
//! [`BlockchainClient`](super::BlockchainClient) is the production
//! implementation; tests plug in a recording mock.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use crate::blockchain::types::{BlockchainResult, TxReceipt};

/// Read and write access to the external ledger.
///
/// Mutating methods return only once the transaction is included and
/// successful; a revert or a confirmation timeout is an error.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Address of the signing identity that submits transactions.
    fn signer_address(&self) -> Address;

    /// Native currency balance, in wei.
    async fn native_balance(&self, account: Address) -> BlockchainResult<U256>;

    /// ERC-20 balance of `owner`, in token base units.
    async fn token_balance(&self, token: Address, owner: Address) -> BlockchainResult<U256>;

    /// Total collateral of `user` in the pool's base currency units.
    async fn collateral_base(&self, pool: Address, user: Address) -> BlockchainResult<U256>;

    /// Approve `spender` to move `amount` of `token` from the signing identity.
    async fn approve(&self, token: Address, spender: Address, amount: U256)
        -> BlockchainResult<TxReceipt>;

    /// Supply `amount` of `asset` to `pool`, crediting `on_behalf_of`.
    async fn supply(
        &self,
        pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
    ) -> BlockchainResult<TxReceipt>;

    /// Withdraw `amount` of `asset` from `pool`, sending it to `to`.
    async fn withdraw(
        &self,
        pool: Address,
        asset: Address,
        amount: U256,
        to: Address,
    ) -> BlockchainResult<TxReceipt>;
}
