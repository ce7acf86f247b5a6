use crate::domains::subscription::models::SubscriptionResponse;
use crate::shared::services::AppState;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::errors::PaymentError;
use axum::{extract::State, http::StatusCode, Json};

/// 내 구독 조회 핸들러
/// Get my subscription handler (free/inactive when never activated)
#[utoipa::path(
    get,
    path = "/api/subscriptions/me",
    responses(
        (status = 200, description = "Subscription retrieved", body = SubscriptionResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Subscriptions",
    security(("BearerAuth" = []))
)]
pub async fn get_my_subscription(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<SubscriptionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let subscription = app_state
        .subscription_state
        .subscription_service
        .get_subscription(authenticated_user.user_id)
        .await
        .map_err(|e| -> (StatusCode, Json<serde_json::Value>) { PaymentError::from(e).into() })?;

    Ok(Json(subscription.into()))
}
