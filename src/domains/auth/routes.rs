// Auth domain routes
// 인증 도메인 라우터
use axum::{routing::get, Router};
use crate::domains::auth::handlers::auth_handler;
use crate::shared::services::AppState;

/// Create authentication router
/// 인증 라우터 생성
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/me", get(auth_handler::get_me))
}
