use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

use crate::models::WalletId;
use crate::validation::ValidationError;

/// Errors raised by wallet handlers and services.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Wallet with id {id} not found")]
    NotFound { id: WalletId },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for WalletError {
    fn from(err: sqlx::Error) -> Self {
        WalletError::Database(err.to_string())
    }
}

/// WalletError -> HTTP error response
impl From<WalletError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: WalletError) -> Self {
        match &err {
            WalletError::Validation(validation) => {
                tracing::warn!("Rejected wallet request: {}", validation);
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Invalid wallet name",
                        "violations": validation.violations,
                    })),
                )
            }
            WalletError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, Json(json!({"error": err.to_string()})))
            }
            WalletError::BadRequest(_) => {
                tracing::warn!("{}", err);
                (StatusCode::BAD_REQUEST, Json(json!({"error": err.to_string()})))
            }
            WalletError::Database(message) => {
                tracing::error!("Wallet storage failure: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Database error"})),
                )
            }
        }
    }
}
