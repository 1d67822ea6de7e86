use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AidChainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("Wallet is not connected")]
    WalletNotConnected,

    #[error("Wallet extension is not available: {0}")]
    WalletUnavailable(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Donation not found: {0}")]
    DonationNotFound(String),

    #[error("Horizon error: {0}")]
    Horizon(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for AidChainError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AidChainError::MissingField(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AidChainError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AidChainError::InsufficientFunds(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AidChainError::WalletNotConnected => (StatusCode::BAD_REQUEST, self.to_string()),
            AidChainError::WalletUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            AidChainError::AccountNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AidChainError::DonationNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
