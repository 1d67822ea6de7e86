//! Wallet session state machine
//!
//! Disconnected → Connecting → Connected → Disconnecting → Disconnected.
//! While connected, a background task refreshes the displayed balance on a
//! fixed interval; refresh failures are logged and swallowed, leaving the
//! previous balance in place. Disconnecting always resets the balance to "0".

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::error::AidChainError;
use crate::wallet::connector::WalletConnector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSession {
    pub public_key: String,
    pub is_connected: bool,
    pub balance: String,
}

struct SessionInner {
    state: ConnectionState,
    public_key: Option<String>,
    balance: String,
}

impl SessionInner {
    fn snapshot(&self) -> WalletSession {
        WalletSession {
            public_key: self.public_key.clone().unwrap_or_default(),
            is_connected: self.state == ConnectionState::Connected,
            balance: self.balance.clone(),
        }
    }
}

pub struct SessionManager<C: WalletConnector> {
    connector: Arc<C>,
    inner: Arc<Mutex<SessionInner>>,
    refresh_interval: Duration,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl<C: WalletConnector> SessionManager<C> {
    pub fn new(connector: Arc<C>, refresh_interval: Duration) -> Self {
        Self {
            connector,
            inner: Arc::new(Mutex::new(SessionInner {
                state: ConnectionState::Disconnected,
                public_key: None,
                balance: "0".to_string(),
            })),
            refresh_interval,
            refresh_task: Mutex::new(None),
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.lock().expect("session lock").state
    }

    pub fn session(&self) -> WalletSession {
        self.inner.lock().expect("session lock").snapshot()
    }

    /// Connect through the custody capability. On any failure the machine
    /// returns to Disconnected and the error surfaces to the caller.
    pub fn connect(&self) -> Result<WalletSession, AidChainError> {
        {
            let mut inner = self.inner.lock().expect("session lock");
            inner.state = ConnectionState::Connecting;
        }

        if !self.connector.is_available() {
            self.reset();
            return Err(AidChainError::WalletUnavailable(
                "connection check failed".to_string(),
            ));
        }

        let public_key = match self.connector.address() {
            Ok(key) => key,
            Err(e) => {
                self.reset();
                return Err(e);
            }
        };

        // Balance fetch is best-effort; the session connects with "0" and the
        // refresh task catches up.
        let balance = self
            .connector
            .fetch_balance(&public_key)
            .unwrap_or_else(|e| {
                log::warn!("Initial balance fetch failed for {}: {}", public_key, e);
                "0".to_string()
            });

        let session = {
            let mut inner = self.inner.lock().expect("session lock");
            inner.state = ConnectionState::Connected;
            inner.public_key = Some(public_key);
            inner.balance = balance;
            inner.snapshot()
        };

        self.spawn_refresh_task();
        Ok(session)
    }

    /// Disconnect and reset the displayed balance to "0" regardless of prior
    /// state.
    pub fn disconnect(&self) {
        {
            let mut inner = self.inner.lock().expect("session lock");
            inner.state = ConnectionState::Disconnecting;
        }

        if let Some(task) = self.refresh_task.lock().expect("task lock").take() {
            task.abort();
        }

        self.reset();
    }

    /// Update the displayed balance if a session is connected. Used when the
    /// operator adjusts the demo balance so the change shows before the next
    /// refresh tick.
    pub fn set_balance(&self, balance: &str) {
        let mut inner = self.inner.lock().expect("session lock");
        if inner.state == ConnectionState::Connected {
            inner.balance = balance.to_string();
        }
    }

    fn reset(&self) {
        let mut inner = self.inner.lock().expect("session lock");
        inner.state = ConnectionState::Disconnected;
        inner.public_key = None;
        inner.balance = "0".to_string();
    }

    fn spawn_refresh_task(&self) {
        let connector = Arc::clone(&self.connector);
        let shared = Arc::clone(&self.inner);
        let interval = self.refresh_interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // first tick fires immediately
            loop {
                ticker.tick().await;

                let public_key = {
                    let inner = shared.lock().expect("session lock");
                    if inner.state != ConnectionState::Connected {
                        break;
                    }
                    match &inner.public_key {
                        Some(key) => key.clone(),
                        None => break,
                    }
                };

                match connector.fetch_balance(&public_key) {
                    Ok(balance) => {
                        let mut inner = shared.lock().expect("session lock");
                        if inner.state == ConnectionState::Connected {
                            inner.balance = balance;
                        }
                    }
                    Err(e) => {
                        // Keep the previous balance on failure.
                        log::warn!("Balance refresh failed for {}: {}", public_key, e);
                    }
                }
            }
        });

        let mut slot = self.refresh_task.lock().expect("task lock");
        if let Some(previous) = slot.replace(task) {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donations::store::{DonationStore, FileStore};
    use crate::wallet::connector::{DemoWallet, UnavailableWallet};
    use tempfile::TempDir;

    fn demo_manager(dir: &TempDir) -> (SessionManager<DemoWallet>, Arc<FileStore>) {
        let store = Arc::new(FileStore::new(dir.path().to_path_buf()));
        let connector = Arc::new(DemoWallet::new(
            "GDEMO".to_string(),
            store.clone() as Arc<dyn DonationStore>,
        ));
        (
            SessionManager::new(connector, Duration::from_millis(20)),
            store,
        )
    }

    #[tokio::test]
    async fn connect_produces_a_connected_session() {
        let dir = TempDir::new().unwrap();
        let (manager, store) = demo_manager(&dir);
        store.save_demo_balance("150").unwrap();

        let session = manager.connect().unwrap();
        assert!(session.is_connected);
        assert_eq!(session.public_key, "GDEMO");
        assert_eq!(session.balance, "150");
        assert_eq!(manager.state(), ConnectionState::Connected);
    }

    #[tokio::test]
    async fn disconnect_always_resets_balance_to_zero() {
        let dir = TempDir::new().unwrap();
        let (manager, store) = demo_manager(&dir);
        store.save_demo_balance("999.5").unwrap();

        manager.connect().unwrap();
        assert_eq!(manager.session().balance, "999.5");

        manager.disconnect();
        let session = manager.session();
        assert!(!session.is_connected);
        assert_eq!(session.balance, "0");
        assert_eq!(manager.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn refresh_task_picks_up_balance_changes() {
        let dir = TempDir::new().unwrap();
        let (manager, store) = demo_manager(&dir);
        store.save_demo_balance("10").unwrap();

        manager.connect().unwrap();
        store.save_demo_balance("75").unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(manager.session().balance, "75");

        manager.disconnect();
    }

    #[tokio::test]
    async fn unavailable_connector_fails_and_stays_disconnected() {
        let manager = SessionManager::new(Arc::new(UnavailableWallet), Duration::from_secs(10));

        let err = manager.connect().unwrap_err();
        assert!(matches!(err, AidChainError::WalletUnavailable(_)));
        assert_eq!(manager.state(), ConnectionState::Disconnected);
        assert_eq!(manager.session().balance, "0");
    }
}
