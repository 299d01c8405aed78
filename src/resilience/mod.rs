//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Ledger call:
//!     → timeouts.rs (enforce RPC / confirmation deadline)
//!     → On failure: surfaced to the caller as a ledger error
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries; a timed-out approve/supply is never resubmitted

pub mod timeouts;

pub use timeouts::{with_confirmation_deadline, with_rpc_deadline};
