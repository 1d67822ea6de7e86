//! Donation records, persistence and history reconciliation

pub mod demo;
pub mod history;
pub mod model;
pub mod stats;
pub mod store;

pub use history::{donation_history, merge_histories};
pub use model::{DonationRecord, DonationStatus};
pub use stats::{donation_stats, DonationStats};
pub use store::{DonationStore, FileStore};
