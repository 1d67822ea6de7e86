//! Built-in demo donations
//!
//! Seed data for demonstrations: a handful of completed donations against the
//! demo account, populated only when the store is empty.

use chrono::{DateTime, Utc};

use crate::config::DEMO_RECIPIENT;
use crate::donations::model::{DonationRecord, DonationStatus};
use crate::donations::store::DonationStore;
use crate::error::StorageError;

fn demo_record(
    id: &str,
    amount: &str,
    category: &str,
    region: &str,
    timestamp: &str,
    hash: &str,
) -> DonationRecord {
    DonationRecord {
        id: id.to_string(),
        amount: amount.to_string(),
        category: category.to_string(),
        region: region.to_string(),
        organization: None,
        timestamp: timestamp
            .parse::<DateTime<Utc>>()
            .expect("static demo timestamp"),
        transaction_hash: hash.to_string(),
        status: DonationStatus::Completed,
        donor_address: DEMO_RECIPIENT.to_string(),
        delivery_nft_id: None,
    }
}

/// Demo donation set, newest first.
pub fn demo_donations() -> Vec<DonationRecord> {
    vec![
        demo_record(
            "demo-1",
            "25.5",
            "money",
            "istanbul",
            "2024-01-15T10:30:00Z",
            "a1b2c3d4e5f6789012345678901234567890abcdef1234567890abcdef123456",
        ),
        demo_record(
            "demo-2",
            "15",
            "blankets",
            "ankara",
            "2024-01-14T14:20:00Z",
            "b2c3d4e5f6789012345678901234567890abcdef1234567890abcdef12345678",
        ),
        demo_record(
            "demo-3",
            "8.75",
            "food",
            "izmir",
            "2024-01-13T09:15:00Z",
            "c3d4e5f6789012345678901234567890abcdef1234567890abcdef1234567890",
        ),
        demo_record(
            "demo-4",
            "12.25",
            "clothing",
            "antalya",
            "2024-01-12T16:45:00Z",
            "d4e5f6789012345678901234567890abcdef1234567890abcdef1234567890ab",
        ),
        demo_record(
            "demo-5",
            "5.5",
            "medicine",
            "adana",
            "2024-01-10T13:20:00Z",
            "e5f6789012345678901234567890abcdef1234567890abcdef1234567890abcd",
        ),
    ]
}

/// Populate the store with demo donations if it is empty.
/// Returns whether anything was written.
pub fn populate_demo_data(store: &dyn DonationStore) -> Result<bool, StorageError> {
    if !store.load_donations().is_empty() {
        return Ok(false);
    }
    store.save_donations(&demo_donations())?;
    log::info!("Demo donations populated");
    Ok(true)
}

/// Clear all stored donations.
pub fn clear_demo_data(store: &dyn DonationStore) -> Result<(), StorageError> {
    store.save_donations(&[])?;
    log::info!("Donation store cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donations::store::FileStore;
    use tempfile::TempDir;

    #[test]
    fn populate_only_when_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        assert!(populate_demo_data(&store).unwrap());
        let count = store.load_donations().len();
        assert!(count > 0);

        // Second populate is a no-op
        assert!(!populate_demo_data(&store).unwrap());
        assert_eq!(store.load_donations().len(), count);

        clear_demo_data(&store).unwrap();
        assert!(store.load_donations().is_empty());
    }
}
