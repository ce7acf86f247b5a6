// Wallet domain routes
// 지갑 도메인 라우터
use axum::{routing::{delete, get}, Router};
use crate::domains::wallet::handlers::wallet_handler;
use crate::shared::services::AppState;

/// Create wallet router (모두 인증 필요)
/// 지갑 라우터 생성
pub fn create_wallet_router() -> Router<AppState> {
    Router::new()
        .route("/", get(wallet_handler::get_user_wallets).post(wallet_handler::create_wallet))
        .route("/:id", delete(wallet_handler::delete_wallet))
}
