use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use crate::shared::errors::{GatewayError, StoreError};

/// PIX 결제 흐름 에러
/// Errors of the PIX charge lifecycle (create / verify / webhook)
#[derive(Error, Debug)]
pub enum PaymentError {
    /// 게이트웨이 에러 (토큰 발급 또는 cob 호출)
    /// Gateway failure (token exchange or charge call)
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// 저장소 에러
    /// Persistence failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// 해당 txid의 충전 요청이 없음
    /// No local charge for this txid
    #[error("PIX charge not found: txid={txid}")]
    ChargeNotFound { txid: String },

    /// 다른 사용자의 충전 요청
    /// Charge belongs to another user
    #[error("You don't have permission to access this charge")]
    Forbidden,

    /// 잘못된 금액
    /// Amount is not a positive value with at most two decimals
    #[error("Invalid charge amount: {0}")]
    InvalidAmount(String),

    /// Webhook 서명 검증 실패
    /// Missing or mismatching webhook signature
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Webhook payload 파싱 실패
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),
}

impl PaymentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::Gateway(_) => StatusCode::BAD_GATEWAY,
            PaymentError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PaymentError::ChargeNotFound { .. } => StatusCode::NOT_FOUND,
            PaymentError::Forbidden => StatusCode::FORBIDDEN,
            PaymentError::InvalidAmount(_) | PaymentError::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            PaymentError::InvalidSignature => StatusCode::UNAUTHORIZED,
        }
    }
}

/// PaymentError를 HTTP 응답으로 변환
impl From<PaymentError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: PaymentError) -> Self {
        (err.status_code(), Json(json!({ "error": err.to_string() })))
    }
}
