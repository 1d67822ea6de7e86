//! Payment transaction envelopes
//!
//! The service builds unsigned payment envelopes server-side; the key-custody
//! capability signs them; signed envelopes are submitted back through the
//! Horizon client. Envelopes are JSON hex-encoded for transport.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AidChainError;
use crate::horizon::HorizonClient;

/// Transaction validity window in seconds.
const ENVELOPE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

impl PaymentEnvelope {
    pub fn encode(&self) -> Result<String, AidChainError> {
        let json = serde_json::to_vec(self)
            .map_err(|e| AidChainError::Internal(format!("envelope encode: {}", e)))?;
        Ok(hex::encode(json))
    }

    pub fn decode(encoded: &str) -> Result<Self, AidChainError> {
        let bytes = hex::decode(encoded.trim())
            .map_err(|e| AidChainError::InvalidInput(format!("invalid envelope: {}", e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AidChainError::InvalidInput(format!("invalid envelope: {}", e)))
    }
}

impl SignedEnvelope {
    pub fn encode(&self) -> Result<String, AidChainError> {
        let json = serde_json::to_vec(self)
            .map_err(|e| AidChainError::Internal(format!("envelope encode: {}", e)))?;
        Ok(hex::encode(json))
    }

    pub fn decode(encoded: &str) -> Result<Self, AidChainError> {
        let bytes = hex::decode(encoded.trim())
            .map_err(|e| AidChainError::InvalidInput(format!("invalid envelope: {}", e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AidChainError::InvalidInput(format!("invalid envelope: {}", e)))
    }
}

/// Build an unsigned payment envelope for a donation.
///
/// Loads the donor account for its current sequence number and fetches the
/// network base fee. The donor account must exist on the ledger.
pub async fn build_payment_envelope(
    horizon: &HorizonClient,
    config: &Config,
    donor_address: &str,
    amount_stroops: u64,
) -> Result<PaymentEnvelope, AidChainError> {
    let account = horizon.load_account(donor_address).await?;
    let sequence: i64 = account.sequence.parse().map_err(|_| {
        AidChainError::Horizon(format!("invalid account sequence: {}", account.sequence))
    })?;
    let fee = horizon.base_fee().await;

    Ok(PaymentEnvelope {
        source_account: donor_address.to_string(),
        sequence: sequence + 1,
        fee,
        destination: config.recipient_address.clone(),
        amount_stroops,
        network_passphrase: config.network_passphrase.clone(),
        timeout_secs: ENVELOPE_TIMEOUT_SECS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TESTNET_PASSPHRASE;

    #[test]
    fn envelope_survives_transport_encoding() {
        let envelope = PaymentEnvelope {
            source_account: "GAAA".to_string(),
            sequence: 42,
            fee: 100,
            destination: "GBBB".to_string(),
            amount_stroops: 255_000_000,
            network_passphrase: TESTNET_PASSPHRASE.to_string(),
            timeout_secs: 30,
        };

        let decoded = PaymentEnvelope::decode(&envelope.encode().unwrap()).unwrap();
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(PaymentEnvelope::decode("not hex").is_err());
        assert!(PaymentEnvelope::decode(&hex::encode(b"{\"nope\":1}")).is_err());
    }
}
