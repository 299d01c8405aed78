//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint with the signing wallet attached
//! - Query chain state (balances, token balances, pool positions)
//! - Submit contract calls and wait for their receipts
//! - Handle timeouts and network errors gracefully

use std::time::Duration;

use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use async_trait::async_trait;

use crate::blockchain::contracts::{IPool, IERC20};
use crate::blockchain::ledger::Ledger;
use crate::blockchain::types::{
    BlockchainConfig, BlockchainError, BlockchainResult, ChainId, TxReceipt,
};
use crate::blockchain::wallet::Wallet;
use crate::observability::metrics;
use crate::resilience::{with_confirmation_deadline, with_rpc_deadline};

/// Production [`Ledger`] backed by an alloy HTTP provider.
#[derive(Clone)]
pub struct BlockchainClient {
    /// Provider with nonce, gas, chain-id and wallet fillers.
    provider: DynProvider<Ethereum>,
    /// Address of the signing identity.
    signer: Address,
    /// Configuration.
    config: BlockchainConfig,
    /// Read-call timeout.
    rpc_timeout: Duration,
    /// Inclusion timeout for submitted transactions.
    confirmation_timeout: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// The chain ID is checked against configuration, but a mismatch or an
    /// unreachable node only logs a warning.
    pub async fn new(config: BlockchainConfig, wallet: &Wallet) -> BlockchainResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e: url::ParseError| {
            BlockchainError::InvalidUrl {
                url: config.rpc_url.clone(),
                reason: e.to_string(),
            }
        })?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.to_network_wallet())
            .connect_http(url)
            .erased();

        let client = Self {
            provider,
            signer: wallet.address(),
            rpc_timeout: Duration::from_secs(config.rpc_timeout_secs),
            confirmation_timeout: Duration::from_secs(config.confirmation_timeout_secs),
            config,
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    chain_id = client.config.chain_id,
                    "Blockchain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Blockchain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        with_rpc_deadline(self.rpc_timeout, self.provider.get_chain_id(), rpc_error)
            .await
            .map(ChainId)
    }

    /// Wait for a submitted transaction to be included and check its status.
    async fn confirm(
        &self,
        call: &'static str,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> BlockchainResult<TxReceipt> {
        let tx_hash = *pending.tx_hash();
        tracing::info!(call, tx_hash = %tx_hash, "Transaction submitted, awaiting confirmation");

        let receipt = with_confirmation_deadline(
            tx_hash,
            self.confirmation_timeout,
            pending
                .with_required_confirmations(u64::from(self.config.confirmation_blocks))
                .get_receipt(),
            rpc_error,
        )
        .await?;

        if !receipt.status() {
            return Err(BlockchainError::Reverted(format!(
                "{} transaction {} reverted",
                call, tx_hash
            )));
        }

        let block_number = receipt.block_number.unwrap_or_default();
        tracing::info!(
            call,
            tx_hash = %tx_hash,
            block_number,
            gas_used = receipt.gas_used,
            "Transaction confirmed"
        );

        Ok(TxReceipt {
            transaction_hash: receipt.transaction_hash,
            block_number,
            gas_used: receipt.gas_used,
        })
    }
}

fn rpc_error(e: impl std::fmt::Display) -> BlockchainError {
    BlockchainError::Rpc(e.to_string())
}

fn observe<T>(call: &'static str, result: BlockchainResult<T>) -> BlockchainResult<T> {
    metrics::record_ledger_call(call, result.is_ok());
    if let Err(e) = &result {
        tracing::warn!(call, error = %e, "Ledger call failed");
    }
    result
}

#[async_trait]
impl Ledger for BlockchainClient {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn native_balance(&self, account: Address) -> BlockchainResult<U256> {
        let result =
            with_rpc_deadline(self.rpc_timeout, self.provider.get_balance(account), rpc_error).await;
        observe("get_balance", result)
    }

    async fn token_balance(&self, token: Address, owner: Address) -> BlockchainResult<U256> {
        let contract = IERC20::new(token, self.provider.clone());
        let call = contract.balanceOf(owner);
        let result = with_rpc_deadline(self.rpc_timeout, call.call(), rpc_error).await;
        observe("balance_of", result)
    }

    async fn collateral_base(&self, pool: Address, user: Address) -> BlockchainResult<U256> {
        let contract = IPool::new(pool, self.provider.clone());
        let call = contract.getUserAccountData(user);
        let result = with_rpc_deadline(self.rpc_timeout, call.call(), rpc_error)
            .await
            .map(|data| data.totalCollateralBase);
        observe("get_user_account_data", result)
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> BlockchainResult<TxReceipt> {
        let contract = IERC20::new(token, self.provider.clone());
        let call = contract.approve(spender, amount);
        let result = match with_rpc_deadline(self.rpc_timeout, call.send(), rpc_error).await {
            Ok(pending) => self.confirm("approve", pending).await,
            Err(e) => Err(e),
        };
        observe("approve", result)
    }

    async fn supply(
        &self,
        pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
    ) -> BlockchainResult<TxReceipt> {
        let contract = IPool::new(pool, self.provider.clone());
        let call = contract.supply(asset, amount, on_behalf_of, 0);
        let result = match with_rpc_deadline(self.rpc_timeout, call.send(), rpc_error).await {
            Ok(pending) => self.confirm("supply", pending).await,
            Err(e) => Err(e),
        };
        observe("supply", result)
    }

    async fn withdraw(
        &self,
        pool: Address,
        asset: Address,
        amount: U256,
        to: Address,
    ) -> BlockchainResult<TxReceipt> {
        let contract = IPool::new(pool, self.provider.clone());
        let call = contract.withdraw(asset, amount, to);
        let result = match with_rpc_deadline(self.rpc_timeout, call.send(), rpc_error).await {
            Ok(pending) => self.confirm("withdraw", pending).await,
            Err(e) => Err(e),
        };
        observe("withdraw", result)
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("chain_id", &self.config.chain_id)
            .field("signer", &self.signer)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
