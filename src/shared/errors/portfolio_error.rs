use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use uuid::Uuid;

/// 거래 내역 / 통계 에러
/// Transaction history and portfolio stats errors
#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Transaction not found: id={id}")]
    NotFound { id: Uuid },

    /// 없는 지갑이거나 다른 사용자의 지갑
    #[error("Wallet not found: id={id}")]
    WalletNotFound { id: Uuid },

    #[error("Invalid transaction: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<PortfolioError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: PortfolioError) -> Self {
        let status = match &err {
            PortfolioError::NotFound { .. } | PortfolioError::WalletNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            PortfolioError::Invalid(_) => StatusCode::BAD_REQUEST,
            PortfolioError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
