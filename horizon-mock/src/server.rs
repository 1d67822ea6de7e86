/// Axum HTTP server setup and routing

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::state::Ledger;

pub fn create_router(ledger: Arc<Ledger>) -> Router {
    // Allow requests from the donation service and tests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Horizon surface
        .route("/accounts/:id", get(get_account))
        .route("/accounts/:id/payments", get(get_payments))
        .route("/fee_stats", get(get_fee_stats))
        .route("/transactions", post(submit_transaction))
        // Seeding helpers
        .route("/mock/accounts", post(seed_account))
        .route("/mock/payments", post(seed_payment))
        // Shared state
        .with_state(ledger)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(ledger: Arc<Ledger>, host: String, port: u16) -> anyhow::Result<()> {
    let app = create_router(ledger);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("🚀 Horizon mock server listening on http://{}", addr);
    log::info!("🌱 Seeding endpoints: POST /mock/accounts, POST /mock/payments");

    axum::serve(listener, app).await?;

    Ok(())
}
