use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use uuid::Uuid;

/// 지갑 관련 에러
/// Wallet-related errors
#[derive(Error, Debug)]
pub enum WalletError {
    /// 지갑을 찾을 수 없음 (또는 다른 사용자의 지갑)
    /// Wallet not found (or owned by another user)
    #[error("Wallet not found: id={id}")]
    NotFound { id: Uuid },

    /// 지갑 주소가 비어 있음
    /// Empty wallet address
    #[error("Wallet address is required")]
    MissingAddress,

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// WalletError를 HTTP 응답으로 변환
impl From<WalletError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: WalletError) -> Self {
        let status = match &err {
            WalletError::NotFound { .. } => StatusCode::NOT_FOUND,
            WalletError::MissingAddress => StatusCode::BAD_REQUEST,
            WalletError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
