use crate::domains::wallet::models::{
    CreateWalletRequest, CreateWalletResponse, DeleteWalletResponse, WalletsResponse,
};
use crate::shared::services::AppState;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::errors::WalletError;
use axum::{extract::{Path, State}, http::StatusCode, Json};
use uuid::Uuid;

/// 지갑 등록 핸들러
/// Create wallet handler
/// Note: user_id는 JWT 토큰에서 자동 추출됨
#[utoipa::path(
    post,
    path = "/api/wallets",
    request_body = CreateWalletRequest,
    responses(
        (status = 200, description = "Wallet created successfully", body = CreateWalletResponse),
        (status = 400, description = "Bad request (empty address)"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallets",
    security(("BearerAuth" = []))
)]
pub async fn create_wallet(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreateWalletRequest>,
) -> Result<Json<CreateWalletResponse>, (StatusCode, Json<serde_json::Value>)> {
    let wallet = app_state
        .wallet_state
        .wallet_service
        .create_wallet(
            authenticated_user.user_id,
            request.wallet_type,
            &request.wallet_address,
            request.wallet_name.as_deref(),
        )
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(CreateWalletResponse {
        wallet,
        message: "Wallet created successfully".to_string(),
    }))
}

/// 사용자의 모든 지갑 조회 핸들러
/// Get all wallets for user handler
#[utoipa::path(
    get,
    path = "/api/wallets",
    responses(
        (status = 200, description = "Wallets retrieved successfully", body = WalletsResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallets",
    security(("BearerAuth" = []))
)]
pub async fn get_user_wallets(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<WalletsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let wallets = app_state
        .wallet_state
        .wallet_service
        .get_user_wallets(authenticated_user.user_id)
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(WalletsResponse { wallets }))
}

/// 지갑 삭제 핸들러
#[utoipa::path(
    delete,
    path = "/api/wallets/{id}",
    params(
        ("id" = Uuid, Path, description = "Wallet ID")
    ),
    responses(
        (status = 200, description = "Wallet deleted", body = DeleteWalletResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 404, description = "Wallet not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallets",
    security(("BearerAuth" = []))
)]
pub async fn delete_wallet(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(wallet_id): Path<Uuid>,
) -> Result<Json<DeleteWalletResponse>, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .wallet_state
        .wallet_service
        .delete_wallet(authenticated_user.user_id, wallet_id)
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(DeleteWalletResponse {
        id: wallet_id,
        message: "Wallet deleted successfully".to_string(),
    }))
}
