//! Horizon-style ledger access
//!
//! - Typed read client (accounts, balances, payment history)
//! - Fee lookup and transaction submission
//! - Payment envelope construction and transport encoding

pub mod client;
pub mod envelope;
pub mod types;

pub use client::HorizonClient;
pub use envelope::{build_payment_envelope, PaymentEnvelope, SignedEnvelope};
pub use types::{AccountResponse, PaymentRecord, TransactionResponse};
