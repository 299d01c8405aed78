//! Transaction gateway subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → units.rs (account / amount parsing)
//!     → service.rs (ledger calls, strictly ordered for deposits)
//!     → projection.rs (fixed-rate arithmetic on the collateral snapshot)
//!     → result back to the handler
//! ```
//!
//! # Design Decisions
//! - Stateless: nothing outlives a request
//! - The ledger is reached only through the `Ledger` trait
//! - No retries and no rollback of a lingering approval

pub mod error;
pub mod projection;
pub mod service;
pub mod units;

pub use error::{GatewayError, GatewayResult};
pub use projection::{Allocation, Projection};
pub use service::{Balances, Gateway, GatewayContext, Prediction, MIN_DEPOSIT, NATIVE_PRICE_USD};
pub use units::AmountInput;
