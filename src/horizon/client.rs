use crate::error::AidChainError;
use crate::horizon::types::{
    AccountResponse, FeeStats, PaymentRecord, PaymentsResponse, TransactionResponse,
};

/// Base fee fallback (stroops) when /fee_stats is unreachable.
const DEFAULT_BASE_FEE: u32 = 100;

pub struct HorizonClient {
    client: reqwest::Client,
    base_url: String,
}

impl HorizonClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Load an account. Distinguishes a missing account (404) from other
    /// failures so callers can degrade to zero-balance defaults.
    pub async fn load_account(&self, public_key: &str) -> Result<AccountResponse, AidChainError> {
        let url = format!("{}/accounts/{}", self.base_url, public_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AidChainError::Horizon(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AidChainError::AccountNotFound(public_key.to_string()));
        }
        if !response.status().is_success() {
            return Err(AidChainError::Horizon(format!(
                "account lookup failed with status {}",
                response.status()
            )));
        }

        response
            .json::<AccountResponse>()
            .await
            .map_err(|e| AidChainError::Horizon(e.to_string()))
    }

    /// Native balance for an account; "0" when the account does not exist.
    pub async fn native_balance(&self, public_key: &str) -> Result<String, AidChainError> {
        match self.load_account(public_key).await {
            Ok(account) => Ok(account.native_balance()),
            Err(AidChainError::AccountNotFound(_)) => Ok("0".to_string()),
            Err(e) => Err(e),
        }
    }

    /// Newest-first native payments sent by the account.
    ///
    /// The ledger carries no donation metadata; callers synthesize
    /// metadata-poor records from these.
    pub async fn payments_for_account(
        &self,
        public_key: &str,
        limit: u32,
    ) -> Result<Vec<PaymentRecord>, AidChainError> {
        let url = format!(
            "{}/accounts/{}/payments?order=desc&limit={}",
            self.base_url, public_key, limit
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AidChainError::Horizon(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AidChainError::AccountNotFound(public_key.to_string()));
        }
        if !response.status().is_success() {
            return Err(AidChainError::Horizon(format!(
                "payment lookup failed with status {}",
                response.status()
            )));
        }

        let page = response
            .json::<PaymentsResponse>()
            .await
            .map_err(|e| AidChainError::Horizon(e.to_string()))?;

        let payments = page
            .embedded
            .records
            .into_iter()
            .filter(|r| {
                r.record_type == "payment"
                    && r.asset_type.as_deref() == Some("native")
                    && r.from.as_deref() == Some(public_key)
            })
            .collect();

        Ok(payments)
    }

    /// Current base fee in stroops, with a fixed fallback on any failure.
    pub async fn base_fee(&self) -> u32 {
        let url = format!("{}/fee_stats", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response
                .json::<FeeStats>()
                .await
                .ok()
                .and_then(|stats| stats.last_ledger_base_fee.parse().ok())
                .unwrap_or(DEFAULT_BASE_FEE),
            _ => {
                log::warn!("Fee stats unavailable, using base fee {}", DEFAULT_BASE_FEE);
                DEFAULT_BASE_FEE
            }
        }
    }

    /// Submit a signed, serialized transaction envelope.
    pub async fn submit(&self, tx: &str) -> Result<TransactionResponse, AidChainError> {
        let url = format!("{}/transactions", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[("tx", tx)])
            .send()
            .await
            .map_err(|e| AidChainError::Horizon(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AidChainError::Horizon(format!(
                "submission failed with status {}: {}",
                status, body
            )));
        }

        response
            .json::<TransactionResponse>()
            .await
            .map_err(|e| AidChainError::Horizon(e.to_string()))
    }
}
