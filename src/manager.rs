//! Application orchestration layer
//!
//! `AppManager` ties the donation store, Horizon client and wallet session
//! together and exposes the operations the HTTP handlers call. Handlers stay
//! thin; all sequencing and validation lives here.

use std::sync::Arc;

use chrono::Utc;

use crate::amount;
use crate::config::Config;
use crate::donations::{
    demo, donation_history, donation_stats, DonationRecord, DonationStats, DonationStatus,
    DonationStore,
};
use crate::error::AidChainError;
use crate::horizon::{build_payment_envelope, HorizonClient, SignedEnvelope, TransactionResponse};
use crate::wallet::{SessionManager, WalletConnector, WalletSession};

/// A donation as requested by the donor, before it touches the ledger.
#[derive(Debug, Clone)]
pub struct DonationRequest {
    pub amount: String,
    pub category: String,
    pub region: String,
    pub organization: Option<String>,
}

pub struct AppManager<C: WalletConnector> {
    config: Config,
    store: Arc<dyn DonationStore>,
    horizon: HorizonClient,
    session: SessionManager<C>,
}

impl<C: WalletConnector> AppManager<C> {
    pub fn new(config: Config, store: Arc<dyn DonationStore>, connector: Arc<C>) -> Self {
        let horizon = HorizonClient::new(config.horizon_url.clone());
        let session = SessionManager::new(connector, config.balance_refresh);
        Self {
            config,
            store,
            horizon,
            session,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn DonationStore {
        self.store.as_ref()
    }

    // --- wallet session ---

    pub fn connect_wallet(&self) -> Result<WalletSession, AidChainError> {
        self.session.connect()
    }

    pub fn disconnect_wallet(&self) {
        self.session.disconnect();
    }

    pub fn wallet_session(&self) -> WalletSession {
        self.session.session()
    }

    // --- ledger reads ---

    /// Ledger balance for an arbitrary account; "0" when it does not exist.
    pub async fn ledger_balance(&self, public_key: &str) -> Result<String, AidChainError> {
        self.horizon.native_balance(public_key).await
    }

    /// Reconciled donation history, newest first. With no address, every
    /// stored record in stored order.
    pub async fn donation_history(&self, address: Option<&str>) -> Vec<DonationRecord> {
        donation_history(
            self.store.as_ref(),
            &self.horizon,
            address,
            self.config.payment_history_limit,
        )
        .await
    }

    /// Balance plus reconciled history for one account, the combined view
    /// the dashboard renders.
    pub async fn wallet_data(
        &self,
        public_key: &str,
    ) -> Result<(String, Vec<DonationRecord>), AidChainError> {
        let balance = self.horizon.native_balance(public_key).await?;
        let history = self.donation_history(Some(public_key)).await;
        Ok((balance, history))
    }

    pub async fn donation_stats(&self) -> DonationStats {
        let history = self.donation_history(None).await;
        donation_stats(&history)
    }

    // --- transaction building and submission ---

    /// Build an unsigned payment envelope for a donation, hex-encoded for
    /// transport to the signing capability.
    pub async fn create_transaction(
        &self,
        donor_address: &str,
        amount: &str,
    ) -> Result<String, AidChainError> {
        let stroops = amount::parse_stroops(amount)?;
        let envelope =
            build_payment_envelope(&self.horizon, &self.config, donor_address, stroops).await?;
        envelope.encode()
    }

    /// Submit an externally-signed envelope to the ledger.
    pub async fn submit_transaction(
        &self,
        signed_tx: &str,
    ) -> Result<TransactionResponse, AidChainError> {
        // Decode first so malformed payloads fail as 400s, not ledger errors.
        SignedEnvelope::decode(signed_tx)?;
        self.horizon.submit(signed_tx).await
    }

    /// The full donation path: validate, build, sign through the connected
    /// wallet, submit, persist the metadata-rich record.
    ///
    /// Validation runs before any network call; an insufficient balance or
    /// missing session never reaches the ledger.
    pub async fn submit_donation(
        &self,
        request: DonationRequest,
    ) -> Result<DonationRecord, AidChainError> {
        let session = self.session.session();
        if !session.is_connected {
            return Err(AidChainError::WalletNotConnected);
        }

        let stroops = amount::parse_stroops(&request.amount)?;
        if stroops == 0 {
            return Err(AidChainError::InvalidInput(
                "donation amount must be positive".to_string(),
            ));
        }
        if request.category.trim().is_empty() {
            return Err(AidChainError::MissingField("category"));
        }
        if request.region.trim().is_empty() {
            return Err(AidChainError::MissingField("region"));
        }

        if let Ok(available) = amount::parse_stroops(&session.balance) {
            if stroops > available {
                return Err(AidChainError::InsufficientFunds(format!(
                    "requested {} but balance is {}",
                    request.amount, session.balance
                )));
            }
        }

        let envelope = build_payment_envelope(
            &self.horizon,
            &self.config,
            &session.public_key,
            stroops,
        )
        .await?;

        let signed = self.session.connector().sign(&envelope)?;
        let response = self.horizon.submit(&signed.encode()?).await?;

        let record = DonationRecord {
            id: response.hash.clone(),
            amount: amount::format_stroops(stroops),
            category: request.category,
            region: request.region,
            organization: request.organization,
            timestamp: Utc::now(),
            transaction_hash: response.hash,
            status: DonationStatus::Completed,
            donor_address: session.public_key.clone(),
            delivery_nft_id: None,
        };
        self.store.prepend_donation(record.clone())?;

        // Best-effort balance update; the refresh task corrects it anyway.
        if let Ok(balance) = self.session.connector().fetch_balance(&session.public_key) {
            self.session.set_balance(&balance);
        }

        log::info!(
            "Donation {} recorded: {} to {} ({})",
            record.id,
            record.amount,
            self.config.recipient_address,
            record.category
        );
        Ok(record)
    }

    /// Mark a donation delivered and attach its proof-of-delivery token.
    pub fn confirm_delivery(&self, donation_id: &str) -> Result<DonationRecord, AidChainError> {
        let mut donations = self.store.load_donations();
        let donation = donations
            .iter_mut()
            .find(|d| d.id == donation_id)
            .ok_or_else(|| AidChainError::DonationNotFound(donation_id.to_string()))?;

        donation.status = DonationStatus::Delivered;
        donation.delivery_nft_id = Some(format!("nft-aid-{}", Utc::now().timestamp_millis()));
        let updated = donation.clone();

        self.store.save_donations(&donations)?;
        log::info!("Donation {} confirmed delivered", donation_id);
        Ok(updated)
    }

    // --- demo and credential helpers ---

    pub fn populate_demo_data(&self) -> Result<bool, AidChainError> {
        Ok(demo::populate_demo_data(self.store.as_ref())?)
    }

    pub fn clear_demo_data(&self) -> Result<(), AidChainError> {
        Ok(demo::clear_demo_data(self.store.as_ref())?)
    }

    /// Set the demo balance, updating the live session display as well.
    pub fn set_demo_balance(&self, balance: &str) -> Result<(), AidChainError> {
        amount::parse_stroops(balance)?;
        self.store.save_demo_balance(balance)?;
        self.session.set_balance(balance);
        Ok(())
    }

    /// Donations held by the store, stored order (newest first).
    pub fn stored_donations(&self) -> Vec<DonationRecord> {
        self.store.load_donations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donations::FileStore;
    use crate::wallet::DemoWallet;
    use std::time::Duration;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> AppManager<DemoWallet> {
        let store: Arc<dyn DonationStore> = Arc::new(FileStore::new(dir.path().to_path_buf()));
        let connector = Arc::new(DemoWallet::new("GDONOR".to_string(), store.clone()));
        let config = Config {
            // Nothing listens here; any ledger call fails fast.
            horizon_url: "http://127.0.0.1:1".to_string(),
            balance_refresh: Duration::from_secs(600),
            ..Config::default()
        };
        AppManager::new(config, store, connector)
    }

    fn request(amount: &str) -> DonationRequest {
        DonationRequest {
            amount: amount.to_string(),
            category: "food".to_string(),
            region: "izmir".to_string(),
            organization: None,
        }
    }

    #[tokio::test]
    async fn donation_requires_connected_wallet() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);

        let err = manager.submit_donation(request("10")).await.unwrap_err();
        assert!(matches!(err, AidChainError::WalletNotConnected));
    }

    #[tokio::test]
    async fn insufficient_funds_rejected_before_any_network_call() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        manager.store().save_demo_balance("5").unwrap();
        manager.connect_wallet().unwrap();

        // The dead ledger endpoint would surface a Horizon error if the
        // request got that far.
        let err = manager.submit_donation(request("10")).await.unwrap_err();
        assert!(matches!(err, AidChainError::InsufficientFunds(_)));

        manager.disconnect_wallet();
    }

    #[tokio::test]
    async fn zero_and_malformed_amounts_rejected() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        manager.store().save_demo_balance("100").unwrap();
        manager.connect_wallet().unwrap();

        assert!(matches!(
            manager.submit_donation(request("0")).await.unwrap_err(),
            AidChainError::InvalidInput(_)
        ));
        assert!(matches!(
            manager.submit_donation(request("ten")).await.unwrap_err(),
            AidChainError::InvalidInput(_)
        ));

        manager.disconnect_wallet();
    }

    #[tokio::test]
    async fn confirm_delivery_stamps_status_and_token() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        manager.populate_demo_data().unwrap();

        let updated = manager.confirm_delivery("demo-2").unwrap();
        assert_eq!(updated.status, DonationStatus::Delivered);
        assert!(updated.delivery_nft_id.as_deref().unwrap().starts_with("nft-aid-"));

        // Persisted, not just returned
        let stored = manager.stored_donations();
        let stored = stored.iter().find(|d| d.id == "demo-2").unwrap();
        assert_eq!(stored.status, DonationStatus::Delivered);
    }

    #[tokio::test]
    async fn confirm_delivery_of_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);

        let err = manager.confirm_delivery("nope").unwrap_err();
        assert!(matches!(err, AidChainError::DonationNotFound(_)));
    }

    #[tokio::test]
    async fn demo_balance_updates_live_session() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        manager.store().save_demo_balance("10").unwrap();
        manager.connect_wallet().unwrap();

        manager.set_demo_balance("250.5").unwrap();
        assert_eq!(manager.wallet_session().balance, "250.5");
        assert!(manager.set_demo_balance("garbage").is_err());

        manager.disconnect_wallet();
    }
}
