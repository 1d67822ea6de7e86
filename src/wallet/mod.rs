//! Wallet connection: custody seam and session state machine

pub mod connector;
pub mod session;

pub use connector::{DemoWallet, UnavailableWallet, WalletConnector};
pub use session::{ConnectionState, SessionManager, WalletSession};
