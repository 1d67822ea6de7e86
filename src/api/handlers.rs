use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use super::types::*;
use crate::donations::{DonationRecord, DonationStats};
use crate::error::AidChainError;
use crate::manager::AppManager;
use crate::wallet::{WalletConnector, WalletSession};

pub async fn health_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
    })
}

/// Always responds 200. Any failure, including a missing key, comes back as
/// a zero balance with an `error` field so the dashboard never breaks on a
/// ledger hiccup.
pub async fn balance_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
    Json(req): Json<BalanceRequest>,
) -> Json<BalanceResponse> {
    let public_key = match require(req.public_key, "publicKey") {
        Ok(key) => key,
        Err(e) => {
            return Json(BalanceResponse {
                balance: "0.00".to_string(),
                error: Some(e.to_string()),
            })
        }
    };

    match manager.ledger_balance(&public_key).await {
        Ok(balance) => Json(BalanceResponse {
            balance,
            error: None,
        }),
        Err(e) => {
            log::warn!("Balance lookup failed for {}: {}", public_key, e);
            Json(BalanceResponse {
                balance: "0.00".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}

pub async fn wallet_data_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
    Query(query): Query<WalletDataQuery>,
) -> Result<Json<WalletDataResponse>, AidChainError> {
    let public_key = require(query.public_key, "publicKey")?;
    let (balance, history) = manager.wallet_data(&public_key).await?;
    Ok(Json(WalletDataResponse { balance, history }))
}

pub async fn create_transaction_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<Json<CreateTransactionResponse>, AidChainError> {
    let donor_address = require(req.donor_address, "donorAddress")?;
    let amount = require(req.amount, "amount")?;
    require(req.category, "category")?;
    require(req.region, "region")?;

    let envelope = manager.create_transaction(&donor_address, &amount).await?;
    Ok(Json(CreateTransactionResponse { envelope }))
}

pub async fn submit_transaction_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
    Json(req): Json<SubmitTransactionRequest>,
) -> Result<Json<SubmitTransactionResponse>, AidChainError> {
    let envelope = require(req.envelope, "envelope")?;
    let result = manager.submit_transaction(&envelope).await?;
    Ok(Json(SubmitTransactionResponse { result }))
}

pub async fn donation_history_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
    Query(query): Query<DonationsQuery>,
) -> Json<Vec<DonationRecord>> {
    let history = manager.donation_history(query.donor_address.as_deref()).await;
    Json(history)
}

pub async fn submit_donation_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
    Json(req): Json<SubmitDonationRequest>,
) -> Result<Json<DonationRecord>, AidChainError> {
    let request = req.into_donation_request()?;
    let record = manager.submit_donation(request).await?;
    Ok(Json(record))
}

pub async fn confirm_delivery_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
    Path(donation_id): Path<String>,
) -> Result<Json<DonationRecord>, AidChainError> {
    let record = manager.confirm_delivery(&donation_id)?;
    Ok(Json(record))
}

pub async fn donation_stats_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
) -> Json<DonationStats> {
    Json(manager.donation_stats().await)
}

pub async fn populate_demo_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
) -> Result<Json<PopulateResponse>, AidChainError> {
    let populated = manager.populate_demo_data()?;
    Ok(Json(PopulateResponse { populated }))
}

pub async fn clear_demo_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
) -> Result<Json<StatusResponse>, AidChainError> {
    manager.clear_demo_data()?;
    Ok(Json(StatusResponse {
        status: "cleared".to_string(),
    }))
}

pub async fn connect_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
) -> Result<Json<WalletSession>, AidChainError> {
    let session = manager.connect_wallet()?;
    Ok(Json(session))
}

pub async fn disconnect_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
) -> Json<WalletSession> {
    manager.disconnect_wallet();
    Json(manager.wallet_session())
}

pub async fn session_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
) -> Json<WalletSession> {
    Json(manager.wallet_session())
}

pub async fn demo_balance_handler<C: WalletConnector>(
    State(manager): State<Arc<AppManager<C>>>,
    Json(req): Json<DemoBalanceRequest>,
) -> Result<Json<WalletSession>, AidChainError> {
    let balance = require(req.balance, "balance")?;
    manager.set_demo_balance(&balance)?;
    Ok(Json(manager.wallet_session()))
}
