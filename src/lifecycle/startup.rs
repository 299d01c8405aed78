//! Startup orchestration.
//!
//! Order: signing identity → ledger client → gateway context → HTTP server
//! → listener. Any error before the listener is bound is fatal.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::blockchain::{BlockchainClient, ChainId, ContractTable, Ledger, Wallet};
use crate::config::GatewayConfig;
use crate::gateway::{Gateway, GatewayContext};
use crate::http::HttpServer;

/// Build every subsystem from `config` and bind the listener.
pub async fn bootstrap(
    config: GatewayConfig,
) -> Result<(HttpServer, TcpListener), Box<dyn std::error::Error>> {
    let wallet = Wallet::from_env(config.blockchain.chain_id)?;
    let client = BlockchainClient::new(config.blockchain.clone(), &wallet).await?;
    let ledger: Arc<dyn Ledger> = Arc::new(client);
    let contracts = ContractTable::mainnet();

    tracing::info!(
        signer = %ledger.signer_address(),
        lending_pool = %contracts.lending_pool(),
        stable_token = %contracts.stable_token(),
        network = %ChainId(config.blockchain.chain_id).network_name(),
        "Gateway context ready"
    );

    let context = GatewayContext {
        ledger,
        contracts,
        chain_id: ChainId(config.blockchain.chain_id),
    };

    let listener = TcpListener::bind(config.bind_address()).await?;
    let server = HttpServer::new(&config, Gateway::new(context));

    Ok((server, listener))
}
