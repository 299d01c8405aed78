//! Yield gateway library.
//!
//! A stateless HTTP front for a lending pool: balance queries, approve +
//! supply deposits, withdrawals, and fixed-rate yield projections.

pub mod blockchain;
pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::GatewayConfig;
pub use gateway::Gateway;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
