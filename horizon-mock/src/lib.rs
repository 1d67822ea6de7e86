/// Horizon Mock Server Library
///
/// Provides both a standalone binary and library components for mocking a
/// Horizon-style ledger API with in-memory state.

pub mod handlers;
pub mod server;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use server::{create_router, run_server};
pub use state::{Ledger, LedgerState};
pub use types::*;
