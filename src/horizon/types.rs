/// Horizon API response schemas
///
/// Explicit types validated at the boundary so the rest of the service never
/// touches dynamic JSON from the ledger.

use serde::{Deserialize, Serialize};

/// Account response from /accounts/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub sequence: String,
    pub balances: Vec<AccountBalance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountBalance {
    pub balance: String,
    pub asset_type: String,
}

impl AccountResponse {
    /// Native-asset balance, or "0" when the account holds none.
    pub fn native_balance(&self) -> String {
        self.balances
            .iter()
            .find(|b| b.asset_type == "native")
            .map(|b| b.balance.clone())
            .unwrap_or_else(|| "0".to_string())
    }
}

/// Paged collection wrapper from Horizon (`_embedded.records`)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsResponse {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedRecords,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedRecords {
    pub records: Vec<PaymentRecord>,
}

/// Payment operation record from /accounts/{id}/payments
///
/// Non-payment operations can appear in the stream; their payment-specific
/// fields are absent, so they are optional here and filtered by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    pub created_at: String,
    pub transaction_hash: String,
}

/// Fee statistics from /fee_stats
#[derive(Debug, Clone, Deserialize)]
pub struct FeeStats {
    pub last_ledger_base_fee: String,
}

/// Submission result from POST /transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub hash: String,
    pub ledger: u64,
    pub successful: bool,
}
