//! Timeout enforcement for ledger calls.
//!
//! # Responsibilities
//! - Wrap every RPC read with a deadline
//! - Wrap confirmation waits with a deadline (the node may never include a tx)
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - No retry after a timeout; the caller sees a ledger error

use std::future::IntoFuture;
use std::time::Duration;

use alloy::primitives::TxHash;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Run an RPC call with a deadline, mapping its error with `map_err`.
pub async fn with_rpc_deadline<T, E, F>(
    limit: Duration,
    fut: F,
    map_err: impl FnOnce(E) -> BlockchainError,
) -> BlockchainResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
{
    match timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(map_err(e)),
        Err(_) => Err(BlockchainError::Timeout(limit.as_secs())),
    }
}

/// Wait for a submitted transaction with a deadline.
pub async fn with_confirmation_deadline<T, E, F>(
    tx_hash: TxHash,
    limit: Duration,
    fut: F,
    map_err: impl FnOnce(E) -> BlockchainError,
) -> BlockchainResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
{
    match timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(map_err(e)),
        Err(_) => Err(BlockchainError::ConfirmationTimeout {
            tx_hash,
            secs: limit.as_secs(),
        }),
    }
}
