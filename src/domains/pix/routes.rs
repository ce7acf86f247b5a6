// PIX domain routes
// PIX 결제 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::pix::handlers::{charge_handler, webhook_handler};
use crate::shared::services::AppState;

/// Create PIX charge router (인증 필요)
pub fn create_pix_router() -> Router<AppState> {
    Router::new()
        .route("/charges", post(charge_handler::create_charge))
        .route("/charges/pending", get(charge_handler::get_pending_charge))
        .route("/charges/:txid", get(charge_handler::get_charge))
        .route("/charges/:txid/verify", post(charge_handler::verify_charge))
}

/// Create webhook router (서명 검증, JWT 없음)
pub fn create_webhook_router() -> Router<AppState> {
    Router::new().route("/pix", post(webhook_handler::pix_webhook))
}
