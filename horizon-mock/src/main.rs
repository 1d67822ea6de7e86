/// Horizon Mock Server
///
/// A lightweight in-memory mock of the Horizon ledger API, with seeding
/// helpers for testing and development.

mod handlers;
mod server;
mod state;
mod types;

use anyhow::{Context, Result};
use std::env;
use std::sync::{Arc, Mutex};

use state::LedgerState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("SERVER_PORT")
        .unwrap_or_else(|_| "8100".to_string())
        .parse()
        .context("Invalid SERVER_PORT")?;

    let ledger = Arc::new(Mutex::new(LedgerState::default()));
    server::run_server(ledger, host, port).await
}
