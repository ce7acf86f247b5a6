use crate::domains::auth::models::UserResponse;
use axum::{http::StatusCode, Json};
use crate::shared::middleware::auth::AuthenticatedUser;

/// 현재 사용자 조회 핸들러
/// Get current user handler (identity from the bearer token)
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "User info retrieved successfully", body = UserResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn get_me(
    authenticated_user: AuthenticatedUser,
) -> Result<Json<UserResponse>, (StatusCode, Json<serde_json::Value>)> {
    Ok(Json(UserResponse {
        user_id: authenticated_user.user_id,
        email: authenticated_user.email,
    }))
}
