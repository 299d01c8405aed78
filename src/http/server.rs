//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, body limit, CORS, deadline, metrics)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::gateway::Gateway;
use crate::http::handlers;
use crate::http::request::{
    enforce_deadline, make_span, propagate_request_id_layer, set_request_id_layer,
};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an already-built gateway.
    pub fn new(config: &GatewayConfig, gateway: Gateway) -> Self {
        let state = AppState {
            gateway: Arc::new(gateway),
        };

        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// CORS must stay inside the body limit; the limited response body has
    /// no `Default`.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let api = Router::new()
            .route("/balances", get(handlers::balances))
            .route("/deposit-aave", post(handlers::deposit))
            .route("/metrics", get(handlers::metrics))
            .route("/withdraw", post(handlers::withdraw))
            .route("/rebalance", post(handlers::rebalance))
            .route("/predict", get(handlers::predict));

        let deadline = Duration::from_secs(config.timeouts.request_secs);

        Router::new()
            .route("/", get(handlers::status))
            .nest("/api/hyper", api)
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(middleware::from_fn_with_state(deadline, enforce_deadline))
            .layer(CorsLayer::permissive())
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(make_span))
                    .layer(propagate_request_id_layer())
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size)),
            )
    }

    /// Run the server until a shutdown signal is broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
