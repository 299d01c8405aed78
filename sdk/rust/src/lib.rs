//! Client for the yield gateway HTTP API.

mod client;

pub use client::{ApiResponse, GatewayClient};
