//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key, RPC URL)
//!     → wallet.rs (key loading)
//!     → client.rs (RPC connection with timeouts, submit + confirm)
//!     → ledger.rs (capability trait the gateway depends on)
//! contracts.rs: sol! bindings and the logical-name → address table
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls and confirmation waits have deadlines

pub mod client;
pub mod contracts;
pub mod ledger;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use contracts::{ContractRole, ContractTable};
pub use ledger::Ledger;
pub use types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId, TxReceipt};
pub use wallet::Wallet;
