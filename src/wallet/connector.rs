//! Key-custody seam
//!
//! Connection checks, address retrieval and transaction signing belong to an
//! external wallet capability. That capability is a trait so it can be
//! swapped and mocked; the shipped implementations are the demo connector and
//! an "unavailable" connector for deployments without custody configured.

use std::sync::Arc;

use uuid::Uuid;

use crate::donations::store::DonationStore;
use crate::error::AidChainError;
use crate::horizon::{PaymentEnvelope, SignedEnvelope};

pub trait WalletConnector: Send + Sync + 'static {
    /// Whether the custody capability is reachable at all.
    fn is_available(&self) -> bool;

    /// The connected account address.
    fn address(&self) -> Result<String, AidChainError>;

    /// Current displayed balance for the account, as a decimal string.
    fn fetch_balance(&self, public_key: &str) -> Result<String, AidChainError>;

    /// Sign a payment envelope. Real signing happens inside the capability;
    /// the service only transports the result.
    fn sign(&self, envelope: &PaymentEnvelope) -> Result<SignedEnvelope, AidChainError>;
}

/// Demo connector: a synthetic address and an operator-settable balance kept
/// in the store's demo-balance slot. Never contacts an external capability.
pub struct DemoWallet {
    address: String,
    store: Arc<dyn DonationStore>,
}

impl DemoWallet {
    pub fn new(address: String, store: Arc<dyn DonationStore>) -> Self {
        Self { address, store }
    }
}

impl WalletConnector for DemoWallet {
    fn is_available(&self) -> bool {
        true
    }

    fn address(&self) -> Result<String, AidChainError> {
        Ok(self.address.clone())
    }

    fn fetch_balance(&self, _public_key: &str) -> Result<String, AidChainError> {
        Ok(self
            .store
            .load_demo_balance()
            .unwrap_or_else(|| "0".to_string()))
    }

    fn sign(&self, envelope: &PaymentEnvelope) -> Result<SignedEnvelope, AidChainError> {
        Ok(SignedEnvelope {
            envelope: envelope.clone(),
            signatures: vec![format!("demo-{}", Uuid::new_v4().simple())],
        })
    }
}

/// Connector for deployments where no custody capability is installed.
/// Every operation surfaces an install hint.
pub struct UnavailableWallet;

const INSTALL_HINT: &str =
    "no key-custody extension is installed; install one or enable the demo wallet";

impl WalletConnector for UnavailableWallet {
    fn is_available(&self) -> bool {
        false
    }

    fn address(&self) -> Result<String, AidChainError> {
        Err(AidChainError::WalletUnavailable(INSTALL_HINT.to_string()))
    }

    fn fetch_balance(&self, _public_key: &str) -> Result<String, AidChainError> {
        Err(AidChainError::WalletUnavailable(INSTALL_HINT.to_string()))
    }

    fn sign(&self, _envelope: &PaymentEnvelope) -> Result<SignedEnvelope, AidChainError> {
        Err(AidChainError::WalletUnavailable(INSTALL_HINT.to_string()))
    }
}
