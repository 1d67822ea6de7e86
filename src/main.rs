use std::sync::Arc;

use aidchain::api::server;
use aidchain::config::Config;
use aidchain::donations::{DonationStore, FileStore};
use aidchain::manager::AppManager;
use aidchain::wallet::{DemoWallet, UnavailableWallet, WalletConnector};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    // Initialize logger (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let store: Arc<dyn DonationStore> = Arc::new(FileStore::new(config.data_dir.clone()));

    log::info!("Starting AidChain donation server on {}", config.bind_address);

    if config.demo_wallet {
        let connector = Arc::new(DemoWallet::new(config.demo_address.clone(), store.clone()));
        run(config, store, connector).await
    } else {
        run(config, store, Arc::new(UnavailableWallet)).await
    }
}

async fn run<C: WalletConnector>(
    config: Config,
    store: Arc<dyn DonationStore>,
    connector: Arc<C>,
) -> anyhow::Result<()> {
    let addr = config.bind_address.clone();
    let manager = Arc::new(AppManager::new(config, store, connector));
    server::start_server(&addr, manager).await
}
