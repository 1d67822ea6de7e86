/// Horizon API response types
///
/// These match the Horizon wire format so clients can consume the mock
/// transparently.

use serde::{Deserialize, Serialize};

/// Account response from /accounts/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub account_id: String,
    pub sequence: String,
    pub balances: Vec<AccountBalance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    pub balance: String,
    pub asset_type: String,
}

/// Payment operation record inside /accounts/{id}/payments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub asset_type: String,
    pub from: String,
    pub to: String,
    pub amount: String,
    pub created_at: String,
    pub transaction_hash: String,
}

/// Paged collection wrapper (`_embedded.records`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsResponse {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedRecords,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedRecords {
    pub records: Vec<PaymentRecord>,
}

/// Fee statistics from /fee_stats
#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// Payment envelope as produced by the donation service: JSON, hex-encoded
/// for transport, camelCase fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEnvelope {
    pub source_account: String,
    pub sequence: i64,
    pub fee: u32,
    pub destination: String,
    pub amount_stroops: u64,
    pub network_passphrase: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedEnvelope {
    pub envelope: PaymentEnvelope,
    pub signatures: Vec<String>,
}

/// Seed request for POST /mock/accounts
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedAccountRequest {
    pub public_key: String,
    /// Decimal balance in native units, e.g. "100.5"
    pub balance: String,
}

/// Seed request for POST /mock/payments
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedPaymentRequest {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub created_at: Option<String>,
    pub transaction_hash: Option<String>,
}
