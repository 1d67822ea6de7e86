/// Axum HTTP handlers for the mocked Horizon endpoints

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::state::{format_balance, parse_balance, AccountState, Ledger};
use crate::types::*;

/// Shared application state
pub type AppState = Arc<Ledger>;

/// Custom error type for handlers
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, message).into_response()
    }
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /accounts/{id}
pub async fn get_account(
    State(ledger): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let ledger = ledger.lock().unwrap();
    let account = ledger
        .accounts
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Account not found: {}", id)))?;

    Ok(Json(AccountResponse {
        id: id.clone(),
        account_id: id,
        sequence: account.sequence.to_string(),
        balances: vec![AccountBalance {
            balance: format_balance(account.balance_stroops),
            asset_type: "native".to_string(),
        }],
    }))
}

#[derive(Debug, Deserialize)]
pub struct PaymentsQuery {
    pub order: Option<String>,
    pub limit: Option<usize>,
}

/// GET /accounts/{id}/payments
pub async fn get_payments(
    State(ledger): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PaymentsQuery>,
) -> Result<Json<PaymentsResponse>, ApiError> {
    let ledger = ledger.lock().unwrap();
    let account = ledger
        .accounts
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Account not found: {}", id)))?;

    let limit = query.limit.unwrap_or(10);
    let descending = query.order.as_deref() != Some("asc");

    let records: Vec<PaymentRecord> = if descending {
        account.payments.iter().rev().take(limit).cloned().collect()
    } else {
        account.payments.iter().take(limit).cloned().collect()
    };

    Ok(Json(PaymentsResponse {
        embedded: EmbeddedRecords { records },
    }))
}

/// GET /fee_stats
pub async fn get_fee_stats(State(ledger): State<AppState>) -> Json<FeeStats> {
    let ledger = ledger.lock().unwrap();
    Json(FeeStats {
        last_ledger_base_fee: ledger.base_fee.to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    pub tx: String,
}

/// POST /transactions
///
/// Decodes the hex-JSON envelope, applies the transfer and returns a
/// transaction hash. Fee is charged to the source on top of the amount.
pub async fn submit_transaction(
    State(ledger): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let bytes = hex::decode(form.tx.trim())
        .map_err(|e| ApiError::BadRequest(format!("Invalid transaction encoding: {}", e)))?;
    let signed: SignedEnvelope = serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::BadRequest(format!("Invalid transaction envelope: {}", e)))?;

    if signed.signatures.is_empty() {
        return Err(ApiError::BadRequest("Transaction is unsigned".to_string()));
    }
    let envelope = signed.envelope;
    if envelope.amount_stroops == 0 {
        return Err(ApiError::BadRequest("Payment amount is zero".to_string()));
    }

    let mut ledger = ledger.lock().unwrap();

    let total = envelope.amount_stroops + envelope.fee as u64;
    {
        let source = ledger
            .accounts
            .get_mut(&envelope.source_account)
            .ok_or_else(|| {
                ApiError::NotFound(format!("Account not found: {}", envelope.source_account))
            })?;
        if source.balance_stroops < total {
            return Err(ApiError::BadRequest(format!(
                "Insufficient balance: have {}, need {}",
                source.balance_stroops, total
            )));
        }
        source.balance_stroops -= total;
        source.sequence = source.sequence.max(envelope.sequence);
    }

    ledger
        .accounts
        .entry(envelope.destination.clone())
        .or_insert_with(AccountState::default)
        .balance_stroops += envelope.amount_stroops;

    let hash = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let record = PaymentRecord {
        id: Uuid::new_v4().simple().to_string(),
        record_type: "payment".to_string(),
        asset_type: "native".to_string(),
        from: envelope.source_account.clone(),
        to: envelope.destination.clone(),
        amount: format_balance(envelope.amount_stroops),
        created_at: Utc::now().to_rfc3339(),
        transaction_hash: hash.clone(),
    };

    for key in [&envelope.source_account, &envelope.destination] {
        if let Some(account) = ledger.accounts.get_mut(key) {
            account.payments.push(record.clone());
        }
    }

    let ledger_seq = ledger.next_ledger;
    ledger.next_ledger += 1;

    log::info!(
        "Applied payment {} -> {} ({} stroops), hash {}",
        envelope.source_account,
        envelope.destination,
        envelope.amount_stroops,
        hash
    );

    Ok(Json(TransactionResponse {
        hash,
        ledger: ledger_seq,
        successful: true,
    }))
}

/// POST /mock/accounts
/// Seeds (or resets) an account with a balance. Not part of the Horizon
/// surface; test/dev helper only.
pub async fn seed_account(
    State(ledger): State<AppState>,
    Json(req): Json<SeedAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let stroops = parse_balance(&req.balance)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid balance: {}", req.balance)))?;

    let mut ledger = ledger.lock().unwrap();
    let account = ledger
        .accounts
        .entry(req.public_key.clone())
        .or_insert_with(AccountState::default);
    account.balance_stroops = stroops;

    Ok(Json(AccountResponse {
        id: req.public_key.clone(),
        account_id: req.public_key,
        sequence: account.sequence.to_string(),
        balances: vec![AccountBalance {
            balance: format_balance(account.balance_stroops),
            asset_type: "native".to_string(),
        }],
    }))
}

/// POST /mock/payments
/// Appends a historical payment record to the sender's stream. Test/dev
/// helper only.
pub async fn seed_payment(
    State(ledger): State<AppState>,
    Json(req): Json<SeedPaymentRequest>,
) -> Result<Json<PaymentRecord>, ApiError> {
    let stroops = parse_balance(&req.amount)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid amount: {}", req.amount)))?;

    let record = PaymentRecord {
        id: Uuid::new_v4().simple().to_string(),
        record_type: "payment".to_string(),
        asset_type: "native".to_string(),
        from: req.from.clone(),
        to: req.to,
        amount: format_balance(stroops),
        created_at: req.created_at.unwrap_or_else(|| Utc::now().to_rfc3339()),
        transaction_hash: req
            .transaction_hash
            .unwrap_or_else(|| format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())),
    };

    let mut ledger = ledger.lock().unwrap();
    ledger
        .accounts
        .entry(req.from)
        .or_insert_with(AccountState::default)
        .payments
        .push(record.clone());

    Ok(Json(record))
}
