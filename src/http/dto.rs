//! Request and response bodies. All JSON is camelCase.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::gateway::AmountInput;

/// `?userAddress=` query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    pub user_address: Option<String>,
}

/// `?userAddress=&days=` query. `days` stays raw text so that junk values
/// fall back to the default horizon instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictQuery {
    pub user_address: Option<String>,
    pub days: Option<String>,
}

/// Body of deposit and withdraw requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub user_address: Option<String>,
    pub amount: Option<AmountInput>,
}

/// Body of rebalance requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceRequest {
    pub user_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub speed_multiplier: &'static str,
    pub ai_boost: &'static str,
    /// Logical contract name → address.
    pub contracts: Map<String, Value>,
    pub network: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesResponse {
    pub success: bool,
    pub eth_balance: String,
    pub usdc_balance: String,
    pub aave_collateral: String,
    #[serde(rename = "totalValueUSD")]
    pub total_value_usd: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    pub success: bool,
    pub message: &'static str,
    pub transaction_hash: String,
    pub block_number: u64,
    /// Echo of the requested amount, in the shape it was sent.
    pub amount: AmountInput,
    pub speed_multiplier: &'static str,
    pub ai_boost: &'static str,
    pub gas_used: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawResponse {
    pub success: bool,
    pub message: &'static str,
    pub transaction_hash: String,
    pub block_number: u64,
    pub gas_used: String,
}

/// Per-venue breakdown of a position.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Breakdown {
    pub aave: f64,
    pub compound: f64,
    pub curve: f64,
    pub uniswap: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub success: bool,
    pub speed_multiplier: &'static str,
    pub ai_boost: &'static str,
    pub principal: f64,
    pub current_rewards: f64,
    pub total_earned: f64,
    #[serde(rename = "effectiveAPY")]
    pub effective_apy: f64,
    #[serde(rename = "baseAPY")]
    pub base_apy: f64,
    pub hourly_rate: f64,
    pub daily_rate: f64,
    pub weekly_projection: f64,
    pub monthly_projection: f64,
    pub yearly_projection: f64,
    pub position: Breakdown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(rename = "currentAPY")]
    pub current_apy: f64,
    pub optimization: &'static str,
    pub allocation: Breakdown,
    pub recommendations: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub success: bool,
    pub predicted_returns: f64,
    pub time_horizon: u32,
    pub accuracy: &'static str,
    pub ai_model: &'static str,
    pub factors: Vec<&'static str>,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_request_accepts_number_or_string() {
        let req: TransferRequest = serde_json::from_str(
            r#"{"userAddress":"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266","amount":100}"#,
        )
        .unwrap();
        assert_eq!(req.amount.unwrap().to_f64(), Some(100.0));

        let req: TransferRequest = serde_json::from_str(r#"{"amount":"75.5"}"#).unwrap();
        assert!(req.user_address.is_none());
        assert_eq!(req.amount.unwrap().to_f64(), Some(75.5));
    }

    #[test]
    fn test_balances_field_names() {
        let body = serde_json::to_value(BalancesResponse {
            success: true,
            eth_balance: "1.0".into(),
            usdc_balance: "2.0".into(),
            aave_collateral: "3.0".into(),
            total_value_usd: 3455.0,
        })
        .unwrap();

        for key in ["success", "ethBalance", "usdcBalance", "aaveCollateral", "totalValueUSD"] {
            assert!(body.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_metrics_field_names() {
        let body = serde_json::to_value(MetricsResponse {
            success: true,
            speed_multiplier: "2X",
            ai_boost: "+50%",
            principal: 1.0,
            current_rewards: 0.0,
            total_earned: 0.0,
            effective_apy: 12.0,
            base_apy: 4.0,
            hourly_rate: 0.0,
            daily_rate: 0.0,
            weekly_projection: 0.0,
            monthly_projection: 0.0,
            yearly_projection: 0.0,
            position: Breakdown {
                aave: 1.0,
                compound: 0.0,
                curve: 0.0,
                uniswap: 0.0,
            },
        })
        .unwrap();

        assert_eq!(body["effectiveAPY"], 12.0);
        assert_eq!(body["baseAPY"], 4.0);
        assert_eq!(body["position"]["aave"], 1.0);
        assert!(body.get("weeklyProjection").is_some());
    }
}
