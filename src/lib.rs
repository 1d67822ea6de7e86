//! AidChain: donation tracking service over a public ledger
//!
//! Serves a JSON API for connecting a wallet, submitting donation payments
//! and reconciling locally-recorded donation metadata with on-chain payment
//! records.

pub mod amount;
pub mod api;
pub mod config;
pub mod donations;
pub mod error;
pub mod horizon;
pub mod manager;
pub mod wallet;
