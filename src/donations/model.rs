//! Donation record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::horizon::PaymentRecord;

/// Category placeholder for records synthesized from the ledger: the chain
/// carries no donation metadata.
pub const ONCHAIN_CATEGORY: &str = "money";
pub const ONCHAIN_REGION: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Completed,
    Failed,
    Delivered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    pub id: String,
    /// Decimal amount string, native asset units
    pub amount: String,
    pub category: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub transaction_hash: String,
    pub status: DonationStatus,
    pub donor_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_nft_id: Option<String>,
}

impl DonationRecord {
    /// Synthesize a record from an on-chain payment. Category and region are
    /// defaulted since the ledger carries no such metadata; the recipient
    /// stands in for the organization.
    pub fn from_payment(payment: &PaymentRecord) -> Option<Self> {
        let donor = payment.from.clone()?;
        let amount = payment.amount.clone()?;
        let timestamp = DateTime::parse_from_rfc3339(&payment.created_at)
            .map(|t| t.with_timezone(&Utc))
            .ok()?;

        Some(Self {
            id: payment.id.clone(),
            amount,
            category: ONCHAIN_CATEGORY.to_string(),
            region: ONCHAIN_REGION.to_string(),
            organization: payment.to.clone(),
            timestamp,
            transaction_hash: payment.transaction_hash.clone(),
            status: DonationStatus::Completed,
            donor_address: donor,
            delivery_nft_id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(created_at: &str) -> PaymentRecord {
        PaymentRecord {
            id: "op-1".to_string(),
            record_type: "payment".to_string(),
            asset_type: Some("native".to_string()),
            from: Some("GDONOR".to_string()),
            to: Some("GORG".to_string()),
            amount: Some("12.5".to_string()),
            created_at: created_at.to_string(),
            transaction_hash: "abc123".to_string(),
        }
    }

    #[test]
    fn onchain_records_are_metadata_poor() {
        let record = DonationRecord::from_payment(&payment("2024-01-15T10:30:00Z")).unwrap();
        assert_eq!(record.category, ONCHAIN_CATEGORY);
        assert_eq!(record.region, ONCHAIN_REGION);
        assert_eq!(record.organization.as_deref(), Some("GORG"));
        assert_eq!(record.status, DonationStatus::Completed);
    }

    #[test]
    fn unparseable_timestamp_drops_the_record() {
        assert!(DonationRecord::from_payment(&payment("yesterday")).is_none());
    }
}
