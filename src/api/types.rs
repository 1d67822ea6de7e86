//! HTTP request and response schemas
//!
//! Request fields arrive as `Option` and are checked explicitly so a missing
//! field surfaces as a 400 with a named field instead of a deserializer
//! error.

use serde::{Deserialize, Serialize};

use crate::donations::DonationRecord;
use crate::horizon::TransactionResponse;
use crate::manager::DonationRequest;
use crate::error::AidChainError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRequest {
    pub public_key: Option<String>,
}

/// Balance lookups never fail at the HTTP level; failures come back as a
/// zero balance with an `error` field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub balance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDataQuery {
    pub public_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDataResponse {
    pub balance: String,
    pub history: Vec<DonationRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub donor_address: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionResponse {
    pub envelope: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTransactionRequest {
    pub envelope: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTransactionResponse {
    pub result: TransactionResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationsQuery {
    pub donor_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDonationRequest {
    pub amount: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub organization: Option<String>,
}

impl SubmitDonationRequest {
    pub fn into_donation_request(self) -> Result<DonationRequest, AidChainError> {
        Ok(DonationRequest {
            amount: self.amount.ok_or(AidChainError::MissingField("amount"))?,
            category: self
                .category
                .ok_or(AidChainError::MissingField("category"))?,
            region: self.region.ok_or(AidChainError::MissingField("region"))?,
            organization: self.organization,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoBalanceRequest {
    pub balance: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct PopulateResponse {
    pub populated: bool,
}

/// Pull a required field out of an optional request slot.
pub fn require(field: Option<String>, name: &'static str) -> Result<String, AidChainError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AidChainError::MissingField(name)),
    }
}
