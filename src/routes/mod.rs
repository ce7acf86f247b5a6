// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use axum::Router;
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::auth::routes::create_auth_router;
use crate::domains::pix::routes::{create_pix_router, create_webhook_router};
use crate::domains::subscription::routes::create_subscription_router;
use crate::domains::wallet::routes::create_wallet_router;
use crate::domains::portfolio::routes::create_transaction_router;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", create_auth_router())
        .nest("/api/pix", create_pix_router())
        .nest("/api/webhooks", create_webhook_router())
        .nest("/api/subscriptions", create_subscription_router())
        .nest("/api/wallets", create_wallet_router())
        .nest("/api/transactions", create_transaction_router())
}
