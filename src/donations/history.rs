//! Donation history reconciliation
//!
//! Merges locally-recorded donations (metadata-rich) with payment records
//! fetched from the ledger (metadata-poor). The ledger is best-effort: any
//! fetch failure falls back to the local view.

use std::collections::HashSet;

use crate::donations::model::DonationRecord;
use crate::donations::store::DonationStore;
use crate::horizon::HorizonClient;

/// Produce the donation history, newest first.
///
/// - No address: every locally-stored record, in stored order.
/// - Address: local records filtered by exact donor match, merged with
///   on-chain payments for that account. On any ledger failure the filtered
///   local list is returned as-is, stored order preserved.
pub async fn donation_history(
    store: &dyn DonationStore,
    horizon: &HorizonClient,
    address: Option<&str>,
    limit: u32,
) -> Vec<DonationRecord> {
    let local = store.load_donations();

    let address = match address {
        Some(a) => a,
        None => return local,
    };

    let local: Vec<DonationRecord> = local
        .into_iter()
        .filter(|d| d.donor_address == address)
        .collect();

    match horizon.payments_for_account(address, limit).await {
        Ok(payments) => {
            let onchain = payments
                .iter()
                .filter_map(DonationRecord::from_payment)
                .collect();
            merge_histories(local, onchain)
        }
        Err(e) => {
            log::warn!("On-chain history unavailable for {}: {}", address, e);
            local
        }
    }
}

/// Merge local and on-chain records, de-duplicating by transaction hash
/// (the local, metadata-rich record wins) and sorting non-increasing by
/// timestamp.
pub fn merge_histories(
    local: Vec<DonationRecord>,
    onchain: Vec<DonationRecord>,
) -> Vec<DonationRecord> {
    let seen: HashSet<String> = local.iter().map(|d| d.transaction_hash.clone()).collect();

    let mut merged = local;
    merged.extend(
        onchain
            .into_iter()
            .filter(|d| !seen.contains(&d.transaction_hash)),
    );
    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donations::model::DonationStatus;
    use crate::donations::store::DonationStore;
    use crate::error::StorageError;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;

    struct MemStore {
        donations: Mutex<Vec<DonationRecord>>,
    }

    impl MemStore {
        fn new(donations: Vec<DonationRecord>) -> Self {
            Self {
                donations: Mutex::new(donations),
            }
        }
    }

    impl DonationStore for MemStore {
        fn load_donations(&self) -> Vec<DonationRecord> {
            self.donations.lock().unwrap().clone()
        }

        fn save_donations(&self, donations: &[DonationRecord]) -> Result<(), StorageError> {
            *self.donations.lock().unwrap() = donations.to_vec();
            Ok(())
        }

        fn load_demo_balance(&self) -> Option<String> {
            None
        }

        fn save_demo_balance(&self, _balance: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn load_passkey_credential(&self) -> Option<String> {
            None
        }

        fn save_passkey_credential(&self, _credential_id: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn record(id: &str, donor: &str, hash: &str, ts: &str) -> DonationRecord {
        DonationRecord {
            id: id.to_string(),
            amount: "10".to_string(),
            category: "food".to_string(),
            region: "izmir".to_string(),
            organization: None,
            timestamp: ts.parse::<DateTime<Utc>>().unwrap(),
            transaction_hash: hash.to_string(),
            status: DonationStatus::Completed,
            donor_address: donor.to_string(),
            delivery_nft_id: None,
        }
    }

    fn dead_horizon() -> HorizonClient {
        // Nothing listens here; every fetch fails fast.
        HorizonClient::new("http://127.0.0.1:1".to_string())
    }

    #[tokio::test]
    async fn no_address_returns_all_local_records() {
        let store = MemStore::new(vec![
            record("1", "A", "h1", "2024-01-02T00:00:00Z"),
            record("2", "B", "h2", "2024-01-01T00:00:00Z"),
        ]);

        let history = donation_history(&store, &dead_horizon(), None, 20).await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, "1");
    }

    #[tokio::test]
    async fn fetch_failure_falls_back_to_filtered_local() {
        // Stored order is deliberately not timestamp-sorted; the fallback
        // must preserve it.
        let store = MemStore::new(vec![
            record("1", "A", "h1", "2024-01-01T00:00:00Z"),
            record("2", "B", "h2", "2024-01-03T00:00:00Z"),
            record("3", "A", "h3", "2024-01-02T00:00:00Z"),
        ]);

        let history = donation_history(&store, &dead_horizon(), Some("A"), 20).await;
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|d| d.donor_address == "A"));
        assert_eq!(history[0].id, "1");
        assert_eq!(history[1].id, "3");
    }

    #[tokio::test]
    async fn unknown_address_yields_empty_history() {
        let store = MemStore::new(vec![record("1", "A", "h1", "2024-01-01T00:00:00Z")]);
        let history = donation_history(&store, &dead_horizon(), Some("Z"), 20).await;
        assert!(history.is_empty());
    }

    #[test]
    fn merge_sorts_newest_first() {
        let local = vec![record("l1", "A", "h1", "2024-01-01T00:00:00Z")];
        let onchain = vec![
            record("o1", "A", "h2", "2024-01-03T00:00:00Z"),
            record("o2", "A", "h3", "2024-01-02T00:00:00Z"),
        ];

        let merged = merge_histories(local, onchain);
        let hashes: Vec<_> = merged.iter().map(|d| d.transaction_hash.as_str()).collect();
        assert_eq!(hashes, vec!["h2", "h3", "h1"]);
        assert!(merged.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn merge_deduplicates_by_transaction_hash_preferring_local() {
        let mut rich = record("l1", "A", "h1", "2024-01-01T00:00:00Z");
        rich.category = "blankets".to_string();
        rich.region = "ankara".to_string();

        let poor = record("o1", "A", "h1", "2024-01-01T00:00:00Z");

        let merged = merge_histories(vec![rich], vec![poor]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].category, "blankets");
        assert_eq!(merged[0].region, "ankara");
    }
}
