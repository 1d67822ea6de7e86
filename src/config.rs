/// Service configuration from environment variables
///
/// Controls the ledger network, Horizon endpoint, donation recipient
/// and demo-wallet behavior. Defaults to the test network.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Demo recipient account used when none is configured.
pub const DEMO_RECIPIENT: &str = "GCNY5OXYSY4FKHOPT2SPOQZAOEIGXB5LBYW3HVU3OWSTQITS65M5RCNY";

#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Horizon-style read/submit API base URL
    pub horizon_url: String,
    /// Network passphrase stamped into transaction envelopes
    pub network_passphrase: String,
    /// Recipient account for donation payments
    pub recipient_address: String,
    /// Base directory for the file-backed donation store
    pub data_dir: PathBuf,
    /// Use the demo wallet connector (synthetic address, settable balance)
    pub demo_wallet: bool,
    /// Address injected by the demo wallet connector
    pub demo_address: String,
    /// Interval between background balance refreshes while connected
    pub balance_refresh: Duration,
    /// Maximum payment records fetched per history query
    pub payment_history_limit: u32,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `LEDGER_NETWORK`: "testnet" (default) or "public"
    /// - `HORIZON_URL`: Horizon API endpoint (optional, has network defaults)
    /// - `NETWORK_PASSPHRASE`: override the network passphrase
    /// - `RECIPIENT_ADDRESS`: donation recipient account
    /// - `DATA_DIR`: donation store directory (default "./data")
    /// - `DEMO_WALLET`: "1" (default) to use the demo connector
    /// - `DEMO_ADDRESS`: address injected by the demo connector
    /// - `BIND_ADDRESS`: HTTP bind address (default "0.0.0.0:8000")
    /// - `BALANCE_REFRESH_SECS`: balance refresh interval (default 10)
    /// - `PAYMENT_HISTORY_LIMIT`: payment fetch limit (default 20)
    pub fn from_env() -> Self {
        let network = env::var("LEDGER_NETWORK")
            .unwrap_or_else(|_| "testnet".to_string())
            .to_lowercase();

        let (default_horizon, default_passphrase) = match network.as_str() {
            "public" | "mainnet" => {
                log::info!("🌐 Using PUBLIC ledger network");
                ("https://horizon.stellar.org", PUBLIC_PASSPHRASE)
            }
            "testnet" | "" => {
                log::info!("🔧 Using TEST ledger network");
                ("https://horizon-testnet.stellar.org", TESTNET_PASSPHRASE)
            }
            other => {
                log::warn!("Unknown network '{}', defaulting to testnet", other);
                ("https://horizon-testnet.stellar.org", TESTNET_PASSPHRASE)
            }
        };

        let horizon_url =
            env::var("HORIZON_URL").unwrap_or_else(|_| default_horizon.to_string());
        log::info!("📡 Horizon URL: {}", horizon_url);

        let network_passphrase = env::var("NETWORK_PASSPHRASE")
            .unwrap_or_else(|_| default_passphrase.to_string());

        let recipient_address =
            env::var("RECIPIENT_ADDRESS").unwrap_or_else(|_| DEMO_RECIPIENT.to_string());

        let demo_wallet = env::var("DEMO_WALLET")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        if demo_wallet {
            log::info!("🔑 Demo wallet connector enabled");
        }

        let demo_address =
            env::var("DEMO_ADDRESS").unwrap_or_else(|_| DEMO_RECIPIENT.to_string());

        let balance_refresh = env::var("BALANCE_REFRESH_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let payment_history_limit = env::var("PAYMENT_HISTORY_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(20);

        Self {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            horizon_url,
            network_passphrase,
            recipient_address,
            data_dir: PathBuf::from(
                env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            ),
            demo_wallet,
            demo_address,
            balance_refresh,
            payment_history_limit,
        }
    }
}

impl Default for Config {
    /// Default configuration (testnet, demo wallet)
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            horizon_url: "https://horizon-testnet.stellar.org".to_string(),
            network_passphrase: TESTNET_PASSPHRASE.to_string(),
            recipient_address: DEMO_RECIPIENT.to_string(),
            data_dir: PathBuf::from("./data"),
            demo_wallet: true,
            demo_address: DEMO_RECIPIENT.to_string(),
            balance_refresh: Duration::from_secs(10),
            payment_history_limit: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_testnet() {
        let config = Config::default();
        assert_eq!(config.network_passphrase, TESTNET_PASSPHRASE);
        assert!(config.horizon_url.contains("testnet"));
        assert!(config.demo_wallet);
    }

    #[test]
    fn test_default_refresh_interval() {
        let config = Config::default();
        assert_eq!(config.balance_refresh, Duration::from_secs(10));
        assert_eq!(config.payment_history_limit, 20);
    }
}
