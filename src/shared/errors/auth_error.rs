use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 사용자 인증 관련 에러 (JWT)
/// User authentication errors (bearer JWT issued by the hosted auth provider)
#[derive(Error, Debug)]
pub enum AuthError {
    /// 잘못된 또는 만료된 토큰
    /// Invalid or expired token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// 토큰이 제공되지 않음
    /// Token not provided
    #[error("Token not provided")]
    MissingToken,

    /// 잘못된 Authorization 헤더 형식
    /// Malformed Authorization header
    #[error("Invalid authorization format. Expected: 'Bearer <token>'")]
    InvalidHeader,

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidToken | AuthError::MissingToken | AuthError::InvalidHeader => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// AuthError를 HTTP 응답으로 변환
impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        (err.status_code(), Json(json!({ "error": err.to_string() })))
    }
}
