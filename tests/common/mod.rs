//! Shared utilities for integration testing: a recording mock ledger and a
//! helper that serves the real router on an ephemeral port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use tokio::net::TcpListener;

use yield_gateway::blockchain::{
    BlockchainError, BlockchainResult, ChainId, ContractRole, ContractTable, Ledger, TxReceipt,
};
use yield_gateway::config::GatewayConfig;
use yield_gateway::gateway::{Gateway, GatewayContext};
use yield_gateway::http::HttpServer;
use yield_gateway::lifecycle::Shutdown;

pub const POOL: Address = Address::repeat_byte(0x11);
pub const TOKEN: Address = Address::repeat_byte(0x22);
pub const SIGNER: Address = Address::repeat_byte(0x33);

/// Anvil's first account, lowercase.
pub const USER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// Addresses that must be rejected before any ledger call.
pub const MALFORMED_ACCOUNTS: [&str; 5] = [
    "",
    "not-an-address",
    "0x1234",
    "0xZZ9fd6e51aad88f6f4ce6ab8827279cfffb92266",
    "0xF39fd6e51aad88f6f4ce6ab8827279cfffb92266",
];

/// One observable ledger interaction, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NativeBalance(Address),
    TokenBalance { token: Address, owner: Address },
    Collateral { pool: Address, user: Address },
    ApproveSubmitted { token: Address, spender: Address, amount: U256 },
    ApproveConfirmed,
    SupplySubmitted { pool: Address, asset: Address, amount: U256, on_behalf_of: Address },
    SupplyConfirmed,
    WithdrawSubmitted { pool: Address, asset: Address, amount: U256, to: Address },
    WithdrawConfirmed,
}

/// In-memory [`Ledger`] that records every call and can be told to fail.
#[derive(Default)]
pub struct MockLedger {
    pub events: Mutex<Vec<Event>>,
    pub native: U256,
    pub token: U256,
    pub collateral: U256,
    pub fail_native: bool,
    pub fail_collateral: bool,
    pub fail_approve: bool,
    pub fail_supply: bool,
    pub fail_withdraw: bool,
    /// Extra time the approval takes to confirm.
    pub approve_delay: Duration,
}

#[allow(dead_code)]
impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collateral in whole USD (the pool reports 8 decimals).
    pub fn with_collateral_usd(mut self, usd: u64) -> Self {
        self.collateral = U256::from(usd) * U256::from(100_000_000u64);
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn receipt(byte: u8) -> TxReceipt {
        TxReceipt {
            transaction_hash: TxHash::repeat_byte(byte),
            block_number: 19_000_000 + u64::from(byte),
            gas_used: 50_000 + u64::from(byte),
        }
    }

    async fn settle() {
        // Inclusion takes a moment; lets a racing call show up in the log
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

#[async_trait]
impl Ledger for MockLedger {
    fn signer_address(&self) -> Address {
        SIGNER
    }

    async fn native_balance(&self, account: Address) -> BlockchainResult<U256> {
        self.record(Event::NativeBalance(account));
        if self.fail_native {
            return Err(BlockchainError::Rpc("connection refused".into()));
        }
        Ok(self.native)
    }

    async fn token_balance(&self, token: Address, owner: Address) -> BlockchainResult<U256> {
        self.record(Event::TokenBalance { token, owner });
        Ok(self.token)
    }

    async fn collateral_base(&self, pool: Address, user: Address) -> BlockchainResult<U256> {
        self.record(Event::Collateral { pool, user });
        if self.fail_collateral {
            return Err(BlockchainError::Timeout(10));
        }
        Ok(self.collateral)
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> BlockchainResult<TxReceipt> {
        self.record(Event::ApproveSubmitted { token, spender, amount });
        Self::settle().await;
        tokio::time::sleep(self.approve_delay).await;
        if self.fail_approve {
            return Err(BlockchainError::Reverted("approve transaction reverted".into()));
        }
        self.record(Event::ApproveConfirmed);
        Ok(Self::receipt(0xa1))
    }

    async fn supply(
        &self,
        pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
    ) -> BlockchainResult<TxReceipt> {
        self.record(Event::SupplySubmitted { pool, asset, amount, on_behalf_of });
        Self::settle().await;
        if self.fail_supply {
            return Err(BlockchainError::Reverted("supply transaction reverted".into()));
        }
        self.record(Event::SupplyConfirmed);
        Ok(Self::receipt(0xb2))
    }

    async fn withdraw(
        &self,
        pool: Address,
        asset: Address,
        amount: U256,
        to: Address,
    ) -> BlockchainResult<TxReceipt> {
        self.record(Event::WithdrawSubmitted { pool, asset, amount, to });
        Self::settle().await;
        if self.fail_withdraw {
            return Err(BlockchainError::Reverted("withdraw transaction reverted".into()));
        }
        self.record(Event::WithdrawConfirmed);
        Ok(Self::receipt(0xc3))
    }
}

/// Contract table pointing at the mock addresses.
pub fn test_contracts() -> ContractTable {
    ContractTable::new(
        [
            (ContractRole::LendingPool, POOL),
            (ContractRole::StableToken, TOKEN),
        ],
        6,
    )
}

#[allow(dead_code)]
pub fn gateway_with(ledger: Arc<MockLedger>) -> Gateway {
    Gateway::new(GatewayContext {
        ledger,
        contracts: test_contracts(),
        chain_id: ChainId(31337),
    })
}

/// Serve the gateway on 127.0.0.1 with an OS-assigned port.
///
/// Returns the base URL and the shutdown handle.
#[allow(dead_code)]
pub async fn start_gateway(ledger: Arc<MockLedger>) -> (String, Shutdown) {
    let mut config = GatewayConfig::default();
    config.observability.metrics_enabled = false;
    start_gateway_with_config(ledger, config).await
}

#[allow(dead_code)]
pub async fn start_gateway_with_config(
    ledger: Arc<MockLedger>,
    config: GatewayConfig,
) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, gateway_with(ledger));
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}", addr), shutdown)
}
