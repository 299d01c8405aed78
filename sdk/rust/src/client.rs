use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Status code and JSON body of a gateway response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `error` field of an error body, if any.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferBody<'a> {
    user_address: &'a str,
    amount: &'a Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountBody<'a> {
    user_address: &'a str,
}

pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Service status and contract table.
    pub async fn status(&self) -> Result<ApiResponse, reqwest::Error> {
        self.get("/", &[]).await
    }

    pub async fn balances(&self, user_address: &str) -> Result<ApiResponse, reqwest::Error> {
        self.get("/api/hyper/balances", &[("userAddress", user_address)]).await
    }

    /// `amount` is sent as given: a JSON number or a numeric string.
    pub async fn deposit(
        &self,
        user_address: &str,
        amount: impl Into<Value>,
    ) -> Result<ApiResponse, reqwest::Error> {
        let amount = amount.into();
        self.post(
            "/api/hyper/deposit-aave",
            &TransferBody { user_address, amount: &amount },
        )
        .await
    }

    pub async fn metrics(&self, user_address: &str) -> Result<ApiResponse, reqwest::Error> {
        self.get("/api/hyper/metrics", &[("userAddress", user_address)]).await
    }

    pub async fn withdraw(
        &self,
        user_address: &str,
        amount: impl Into<Value>,
    ) -> Result<ApiResponse, reqwest::Error> {
        let amount = amount.into();
        self.post(
            "/api/hyper/withdraw",
            &TransferBody { user_address, amount: &amount },
        )
        .await
    }

    pub async fn rebalance(&self, user_address: &str) -> Result<ApiResponse, reqwest::Error> {
        self.post("/api/hyper/rebalance", &AccountBody { user_address }).await
    }

    /// `days` is passed through verbatim; `None` omits it.
    pub async fn predict(
        &self,
        user_address: &str,
        days: Option<&str>,
    ) -> Result<ApiResponse, reqwest::Error> {
        let mut query = vec![("userAddress", user_address)];
        if let Some(days) = days {
            query.push(("days", days));
        }
        self.get("/api/hyper/predict", &query).await
    }

    /// Send an arbitrary JSON body to `path`.
    pub async fn post_raw(&self, path: &str, body: &Value) -> Result<ApiResponse, reqwest::Error> {
        self.post(path, body).await
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        Self::read(resp).await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, reqwest::Error> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Self::read(resp).await
    }

    async fn read(resp: reqwest::Response) -> Result<ApiResponse, reqwest::Error> {
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        // Non-JSON bodies (e.g. a bare 404) are kept as a string
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ApiResponse { status, body })
    }
}
