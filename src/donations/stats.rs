//! Donation statistics

use std::collections::HashMap;

use serde::Serialize;

use crate::amount;
use crate::donations::model::DonationRecord;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    pub total_donations: usize,
    /// Decimal string sum of all amounts
    pub total_amount: String,
    pub category_stats: HashMap<String, u32>,
    pub region_stats: HashMap<String, u32>,
}

/// Aggregate counts and totals over a set of donation records.
/// Unparseable amounts are skipped rather than failing the whole report.
pub fn donation_stats(donations: &[DonationRecord]) -> DonationStats {
    let mut total_stroops: u64 = 0;
    let mut category_stats: HashMap<String, u32> = HashMap::new();
    let mut region_stats: HashMap<String, u32> = HashMap::new();

    for donation in donations {
        match amount::parse_stroops(&donation.amount) {
            Ok(stroops) => total_stroops = total_stroops.saturating_add(stroops),
            Err(_) => log::warn!(
                "Skipping unparseable amount '{}' in donation {}",
                donation.amount,
                donation.id
            ),
        }
        *category_stats.entry(donation.category.clone()).or_insert(0) += 1;
        *region_stats.entry(donation.region.clone()).or_insert(0) += 1;
    }

    DonationStats {
        total_donations: donations.len(),
        total_amount: amount::format_stroops(total_stroops),
        category_stats,
        region_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donations::demo::demo_donations;

    #[test]
    fn aggregates_demo_set() {
        let stats = donation_stats(&demo_donations());
        assert_eq!(stats.total_donations, 5);
        assert_eq!(stats.total_amount, "67");
        assert_eq!(stats.category_stats["money"], 1);
        assert_eq!(stats.region_stats["izmir"], 1);
    }

    #[test]
    fn empty_set_is_zero() {
        let stats = donation_stats(&[]);
        assert_eq!(stats.total_donations, 0);
        assert_eq!(stats.total_amount, "0");
        assert!(stats.category_stats.is_empty());
    }
}
