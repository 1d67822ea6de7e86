/// Common test utilities for integration tests
///
/// Spins up an in-process Horizon mock on an ephemeral port and builds an
/// application manager backed by a temp-dir store and the demo wallet
/// connector.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;

use aidchain::api::create_router;
use aidchain::config::Config;
use aidchain::donations::{DonationStore, FileStore};
use aidchain::manager::AppManager;
use aidchain::wallet::DemoWallet;
use horizon_mock::LedgerState;

/// Donor account used across integration tests.
pub const DONOR: &str = "GDONORTESTACCOUNT";

/// Test environment with automatic cleanup
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub manager: Arc<AppManager<DemoWallet>>,
    pub store: Arc<dyn DonationStore>,
    pub horizon_url: String,
    pub client: reqwest::Client,
}

impl TestEnvironment {
    pub async fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;

        // In-process Horizon mock on an ephemeral port
        let ledger = Arc::new(Mutex::new(LedgerState::default()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let horizon_url = format!("http://{}", listener.local_addr()?);
        let mock = horizon_mock::create_router(ledger);
        tokio::spawn(async move {
            axum::serve(listener, mock).await.expect("mock server");
        });

        let config = Config {
            horizon_url: horizon_url.clone(),
            data_dir: temp_dir.path().to_path_buf(),
            demo_address: DONOR.to_string(),
            // Long interval so background refreshes never race assertions
            balance_refresh: Duration::from_secs(600),
            ..Config::default()
        };

        let store: Arc<dyn DonationStore> = Arc::new(FileStore::new(config.data_dir.clone()));
        let connector = Arc::new(DemoWallet::new(DONOR.to_string(), store.clone()));
        let manager = Arc::new(AppManager::new(config, store.clone(), connector));

        Ok(Self {
            temp_dir,
            manager,
            store,
            horizon_url,
            client: reqwest::Client::new(),
        })
    }

    /// Serve the application API on an ephemeral port; returns the base URL.
    pub async fn serve_api(&self) -> anyhow::Result<String> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let app = create_router(self.manager.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("api server");
        });
        Ok(base_url)
    }

    /// Seed a ledger account with a decimal balance.
    pub async fn seed_account(&self, public_key: &str, balance: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(format!("{}/mock/accounts", self.horizon_url))
            .json(&json!({ "publicKey": public_key, "balance": balance }))
            .send()
            .await?;
        anyhow::ensure!(response.status().is_success(), "seeding account failed");
        Ok(())
    }

    /// Seed a historical on-chain payment sent by `from`.
    pub async fn seed_payment(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        created_at: &str,
        transaction_hash: &str,
    ) -> anyhow::Result<()> {
        let response = self
            .client
            .post(format!("{}/mock/payments", self.horizon_url))
            .json(&json!({
                "from": from,
                "to": to,
                "amount": amount,
                "createdAt": created_at,
                "transactionHash": transaction_hash,
            }))
            .send()
            .await?;
        anyhow::ensure!(response.status().is_success(), "seeding payment failed");
        Ok(())
    }
}
