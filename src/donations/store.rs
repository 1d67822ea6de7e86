//! Donation persistence
//!
//! An injected repository trait with a file-backed implementation, one file
//! per concern, so tests can swap in an in-memory store.

use std::fs;
use std::path::PathBuf;

use crate::donations::model::DonationRecord;
use crate::error::StorageError;

/// Repository for persisted client state: the donation list, the demo
/// balance and the passkey credential id.
pub trait DonationStore: Send + Sync {
    /// All stored donations in stored order (newest first by convention).
    /// Missing or corrupt data yields an empty list, never an error.
    fn load_donations(&self) -> Vec<DonationRecord>;

    fn save_donations(&self, donations: &[DonationRecord]) -> Result<(), StorageError>;

    /// Prepend a record so the list stays newest-first.
    fn prepend_donation(&self, donation: DonationRecord) -> Result<(), StorageError> {
        let mut donations = self.load_donations();
        donations.insert(0, donation);
        self.save_donations(&donations)
    }

    fn load_demo_balance(&self) -> Option<String>;
    fn save_demo_balance(&self, balance: &str) -> Result<(), StorageError>;

    fn load_passkey_credential(&self) -> Option<String>;
    fn save_passkey_credential(&self, credential_id: &str) -> Result<(), StorageError>;
}

#[derive(Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_path
    }

    fn donations_path(&self) -> PathBuf {
        self.base_path.join("donations.json")
    }

    fn demo_balance_path(&self) -> PathBuf {
        self.base_path.join("demo_balance.txt")
    }

    fn passkey_path(&self) -> PathBuf {
        self.base_path.join("passkey_credential.txt")
    }
}

impl DonationStore for FileStore {
    fn load_donations(&self) -> Vec<DonationRecord> {
        let path = self.donations_path();
        if !path.exists() {
            return Vec::new();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read donation store {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(donations) => donations,
            Err(e) => {
                log::warn!("Corrupt donation store {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn save_donations(&self, donations: &[DonationRecord]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        let json = serde_json::to_string_pretty(donations)?;
        fs::write(self.donations_path(), json)?;
        Ok(())
    }

    fn load_demo_balance(&self) -> Option<String> {
        fs::read_to_string(self.demo_balance_path())
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn save_demo_balance(&self, balance: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.demo_balance_path(), balance)?;
        Ok(())
    }

    fn load_passkey_credential(&self) -> Option<String> {
        fs::read_to_string(self.passkey_path())
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn save_passkey_credential(&self, credential_id: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.passkey_path(), credential_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donations::model::DonationStatus;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(id: &str) -> DonationRecord {
        DonationRecord {
            id: id.to_string(),
            amount: "10".to_string(),
            category: "money".to_string(),
            region: "istanbul".to_string(),
            organization: None,
            timestamp: Utc::now(),
            transaction_hash: format!("tx-{}", id),
            status: DonationStatus::Completed,
            donor_address: "GDONOR".to_string(),
            delivery_nft_id: None,
        }
    }

    #[test]
    fn missing_store_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(store.load_donations().is_empty());
    }

    #[test]
    fn corrupt_store_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        fs::write(dir.path().join("donations.json"), "{not json").unwrap();
        assert!(store.load_donations().is_empty());
    }

    #[test]
    fn prepend_keeps_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store.prepend_donation(record("first")).unwrap();
        store.prepend_donation(record("second")).unwrap();

        let donations = store.load_donations();
        assert_eq!(donations.len(), 2);
        assert_eq!(donations[0].id, "second");
        assert_eq!(donations[1].id, "first");
    }

    #[test]
    fn demo_balance_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(store.load_demo_balance().is_none());
        store.save_demo_balance("150.5").unwrap();
        assert_eq!(store.load_demo_balance().as_deref(), Some("150.5"));
    }

    #[test]
    fn passkey_credential_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(store.load_passkey_credential().is_none());
        store.save_passkey_credential("cred-abc").unwrap();
        assert_eq!(store.load_passkey_credential().as_deref(), Some("cred-abc"));
    }
}
