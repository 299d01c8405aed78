//! Endpoint handlers.
//!
//! Each handler extracts its input, calls one gateway operation and shapes
//! the JSON response. Malformed query strings and bodies are rejected with
//! the same `{error, details}` body as every other validation failure.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::{Map, Value};

use crate::gateway::projection::{AI_BOOST_LABEL, SPEED_MULTIPLIER_LABEL};
use crate::http::dto::{
    AccountQuery, BalancesResponse, Breakdown, DepositResponse, MetricsResponse, PredictQuery,
    PredictResponse, RebalanceRequest, RebalanceResponse, StatusResponse, TransferRequest,
    WithdrawResponse,
};
use crate::http::response::ApiError;
use crate::http::server::AppState;

const RECOMMENDATIONS: [&str; 4] = [
    "Maintain 40% in Aave for stability",
    "Increase Compound exposure for higher yields",
    "Add Curve for stablecoin farming",
    "Utilize Uniswap V3 concentrated liquidity",
];

const PREDICTION_FACTORS: [&str; 4] = [
    "Historical Aave APY trends",
    "Market volatility analysis",
    "Liquidity depth metrics",
    "Gas price forecasting",
];

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let contracts: Map<String, Value> = state
        .gateway
        .contracts()
        .entries()
        .map(|(role, addr)| (role.key().to_string(), Value::String(addr.to_checksum(None))))
        .collect();

    Json(StatusResponse {
        status: "online",
        message: "Hyper Earning Engine Backend - 2X SPEED",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        speed_multiplier: SPEED_MULTIPLIER_LABEL,
        ai_boost: AI_BOOST_LABEL,
        contracts,
        network: state.gateway.chain_id().network_name(),
    })
}

pub async fn balances(
    State(state): State<AppState>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<Json<BalancesResponse>, ApiError> {
    let Query(query) = query?;
    let balances = state
        .gateway
        .get_balances(query.user_address.as_deref())
        .await
        .map_err(|e| ApiError::from_gateway(e, "Failed to fetch balances"))?;

    Ok(Json(BalancesResponse {
        success: true,
        eth_balance: balances.native,
        usdc_balance: balances.stable_token,
        aave_collateral: balances.collateral,
        total_value_usd: balances.total_value_usd,
    }))
}

pub async fn deposit(
    State(state): State<AppState>,
    body: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<DepositResponse>, ApiError> {
    let Json(request) = body?;
    let receipt = state
        .gateway
        .deposit(request.user_address.as_deref(), request.amount.as_ref())
        .await
        .map_err(|e| ApiError::from_gateway(e, "Failed to deposit"))?;

    tracing::info!(
        tx_hash = %receipt.transaction_hash,
        block_number = receipt.block_number,
        "Deposit confirmed"
    );

    Ok(Json(DepositResponse {
        success: true,
        message: "Deposited to Aave successfully",
        transaction_hash: receipt.transaction_hash.to_string(),
        block_number: receipt.block_number,
        // deposit() only succeeds with an amount present
        amount: request.amount.unwrap_or_else(|| 0.0.into()),
        speed_multiplier: SPEED_MULTIPLIER_LABEL,
        ai_boost: AI_BOOST_LABEL,
        gas_used: receipt.gas_used.to_string(),
    }))
}

pub async fn metrics(
    State(state): State<AppState>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<Json<MetricsResponse>, ApiError> {
    let Query(query) = query?;
    let p = state
        .gateway
        .metrics(query.user_address.as_deref())
        .await
        .map_err(|e| ApiError::from_gateway(e, "Failed to fetch metrics"))?;

    Ok(Json(MetricsResponse {
        success: true,
        speed_multiplier: SPEED_MULTIPLIER_LABEL,
        ai_boost: AI_BOOST_LABEL,
        principal: p.principal,
        current_rewards: 0.0,
        total_earned: 0.0,
        effective_apy: p.effective_apy,
        base_apy: p.base_apy,
        hourly_rate: p.hourly_rate,
        daily_rate: p.daily_rate,
        weekly_projection: p.weekly_projection,
        monthly_projection: p.monthly_projection,
        yearly_projection: p.yearly_projection,
        position: Breakdown {
            aave: p.principal,
            compound: 0.0,
            curve: 0.0,
            uniswap: 0.0,
        },
    }))
}

pub async fn withdraw(
    State(state): State<AppState>,
    body: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<WithdrawResponse>, ApiError> {
    let Json(request) = body?;
    let receipt = state
        .gateway
        .withdraw(request.user_address.as_deref(), request.amount.as_ref())
        .await
        .map_err(|e| ApiError::from_gateway(e, "Failed to withdraw"))?;

    Ok(Json(WithdrawResponse {
        success: true,
        message: "Withdrawal successful with 2X rewards",
        transaction_hash: receipt.transaction_hash.to_string(),
        block_number: receipt.block_number,
        gas_used: receipt.gas_used.to_string(),
    }))
}

pub async fn rebalance(
    State(state): State<AppState>,
    body: Result<Json<RebalanceRequest>, JsonRejection>,
) -> Result<Json<RebalanceResponse>, ApiError> {
    let Json(request) = body?;
    let allocation = state
        .gateway
        .rebalance(request.user_address.as_deref())
        .await
        .map_err(|e| ApiError::from_gateway(e, "Failed to rebalance"))?;

    Ok(Json(RebalanceResponse {
        success: true,
        message: "AI rebalanced portfolio for maximum yield",
        current_apy: crate::gateway::projection::effective_apy(),
        optimization: "Maximum yield achieved",
        allocation: Breakdown {
            aave: allocation.aave,
            compound: allocation.compound,
            curve: allocation.curve,
            uniswap: allocation.uniswap,
        },
        recommendations: RECOMMENDATIONS.to_vec(),
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    query: Result<Query<PredictQuery>, QueryRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Query(query) = query?;
    let prediction = state
        .gateway
        .predict(query.user_address.as_deref(), query.days.as_deref())
        .await
        .map_err(|e| ApiError::from_gateway(e, "Failed to predict"))?;

    Ok(Json(PredictResponse {
        success: true,
        predicted_returns: prediction.predicted_returns,
        time_horizon: prediction.horizon_days,
        accuracy: "95%",
        ai_model: "Premium",
        factors: PREDICTION_FACTORS.to_vec(),
    }))
}
