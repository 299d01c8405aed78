//! Gateway error taxonomy.
//!
//! Exactly two kinds exist: validation failures (caller's fault, no ledger
//! call was made) and ledger failures (anything the node or a contract
//! reported, including timeouts).

use thiserror::Error;

use crate::blockchain::BlockchainError;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Account missing or not a valid address.
    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    /// Deposit amount missing, zero, or below the minimum.
    #[error("Amount {received} is below the minimum deposit of {minimum}")]
    BelowMinimum { minimum: f64, received: String },

    /// Amount is not a decimal number representable at token precision.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Any failure reported by the ledger.
    #[error(transparent)]
    Ledger(#[from] BlockchainError),
}

impl GatewayError {
    /// Whether the error was raised before any ledger call.
    pub fn is_validation(&self) -> bool {
        !matches!(self, GatewayError::Ledger(_))
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(GatewayError::InvalidAccount("missing".into()).is_validation());
        assert!(GatewayError::BelowMinimum {
            minimum: 50.0,
            received: "10".into()
        }
        .is_validation());
        assert!(!GatewayError::from(BlockchainError::Timeout(10)).is_validation());
    }

    #[test]
    fn test_ledger_message_passes_through() {
        let err = GatewayError::from(BlockchainError::Reverted("supply reverted".into()));
        assert_eq!(err.to_string(), "Transaction reverted: supply reverted");
    }
}
