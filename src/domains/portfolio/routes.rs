// Portfolio domain routes
// 거래 내역 도메인 라우터
use axum::{routing::{delete, get}, Router};
use crate::domains::portfolio::handlers::transaction_handler;
use crate::shared::services::AppState;

pub fn create_transaction_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(transaction_handler::list_transactions).post(transaction_handler::create_transaction),
        )
        .route("/stats", get(transaction_handler::get_stats))
        .route("/:id", delete(transaction_handler::delete_transaction))
}
