//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, trace span)
//!     → handlers.rs (extract input, call the gateway)
//!     → dto.rs (camelCase JSON bodies)
//!     → response.rs (error mapping to 400 / 500)
//!     → Send to client
//! ```

pub mod dto;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::{AppState, HttpServer};
