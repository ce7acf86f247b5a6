// Subscription domain routes
// 구독 도메인 라우터
use axum::{routing::get, Router};
use crate::domains::subscription::handlers::subscription_handler;
use crate::shared::services::AppState;

pub fn create_subscription_router() -> Router<AppState> {
    Router::new().route("/me", get(subscription_handler::get_my_subscription))
}
