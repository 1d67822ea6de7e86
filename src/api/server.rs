use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::manager::AppManager;
use crate::wallet::WalletConnector;

/// Build the application router around a shared manager.
pub fn create_router<C: WalletConnector>(manager: Arc<AppManager<C>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        // Ledger reads
        .route("/api/balance", post(handlers::balance_handler::<C>))
        .route("/api/wallet-data", get(handlers::wallet_data_handler::<C>))
        // Transaction plumbing
        .route(
            "/api/transactions/create",
            post(handlers::create_transaction_handler::<C>),
        )
        .route(
            "/api/transactions/submit",
            post(handlers::submit_transaction_handler::<C>),
        )
        // Donations
        .route(
            "/api/donations",
            get(handlers::donation_history_handler::<C>)
                .post(handlers::submit_donation_handler::<C>),
        )
        .route(
            "/api/donations/:id/confirm-delivery",
            post(handlers::confirm_delivery_handler::<C>),
        )
        .route(
            "/api/donations/stats",
            get(handlers::donation_stats_handler::<C>),
        )
        // Demo data
        .route("/api/demo/populate", post(handlers::populate_demo_handler::<C>))
        .route("/api/demo/clear", post(handlers::clear_demo_handler::<C>))
        // Wallet session
        .route("/api/session", get(handlers::session_handler::<C>))
        .route("/api/session/connect", post(handlers::connect_handler::<C>))
        .route(
            "/api/session/disconnect",
            post(handlers::disconnect_handler::<C>),
        )
        .route(
            "/api/session/demo-balance",
            post(handlers::demo_balance_handler::<C>),
        )
        .layer(cors_layer())
        .with_state(manager)
}

pub async fn start_server<C: WalletConnector>(
    addr: &str,
    manager: Arc<AppManager<C>>,
) -> anyhow::Result<()> {
    let app = create_router(manager);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

// CORS from environment. Set ALLOWED_ORIGINS="https://app.example.org" for
// production; unset allows any origin (development mode).
fn cors_layer() -> CorsLayer {
    match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            log::info!("CORS configured for origins: {}", origins);
            let origin_list: Vec<_> = origins
                .split(',')
                .map(|s| s.trim().parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origin_list)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => {
            log::warn!("CORS: Allowing all origins (development mode). Set ALLOWED_ORIGINS env var for production.");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, exiting gracefully...");
}
