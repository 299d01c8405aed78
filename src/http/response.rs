//! Error responses.
//!
//! # Design Decisions
//! - Validation failures → 400, ledger failures → 500
//! - Body is always `{error, details}`; `details` carries the underlying
//!   message unchanged

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::gateway::GatewayError;
use crate::http::dto::ErrorBody;

/// An error ready to be rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details: details.into(),
            },
        }
    }

    pub fn bad_request(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, details)
    }

    /// Map a gateway error. `ledger_summary` names the failed operation
    /// (e.g. "Failed to deposit") and is used only for ledger failures.
    pub fn from_gateway(err: GatewayError, ledger_summary: &'static str) -> Self {
        match err {
            GatewayError::InvalidAccount(reason) => {
                Self::bad_request("Valid userAddress required", reason)
            }
            GatewayError::BelowMinimum { minimum, received } => Self::bad_request(
                format!("Minimum deposit is ${} USDC", minimum),
                format!("received {}", received),
            ),
            GatewayError::InvalidAmount(reason) => Self::bad_request("Valid amount required", reason),
            GatewayError::Ledger(e) => {
                tracing::error!(error = %e, "{}", ledger_summary);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, ledger_summary, e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Invalid request body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("Invalid query string", rejection.body_text())
    }
}
