use crate::domains::portfolio::models::{
    CreateTransactionRequest, CreateTransactionResponse, DeleteTransactionResponse,
    PortfolioStats, TransactionsResponse,
};
use crate::domains::portfolio::services::transaction_limit;
use crate::shared::services::AppState;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::errors::{PaymentError, PortfolioError, WalletError};
use axum::{extract::{Path, State}, http::StatusCode, Json};
use uuid::Uuid;

// 프리미엄 여부 조회 (거래 목록/통계 공통)
async fn fetch_premium_status(
    app_state: &AppState,
    user_id: Uuid,
) -> Result<bool, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .subscription_state
        .subscription_service
        .is_premium(user_id)
        .await
        .map_err(|e| -> (StatusCode, Json<serde_json::Value>) { PaymentError::from(e).into() })
}

/// 거래 목록 조회 핸들러
/// List transactions handler (free: 5 rows without BRL values, premium: 100 rows)
#[utoipa::path(
    get,
    path = "/api/transactions",
    responses(
        (status = 200, description = "Transactions retrieved", body = TransactionsResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Transactions",
    security(("BearerAuth" = []))
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<TransactionsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let is_premium = fetch_premium_status(&app_state, authenticated_user.user_id).await?;

    let transactions = app_state
        .portfolio_state
        .transaction_service
        .list_transactions(authenticated_user.user_id, is_premium)
        .await
        .map_err(|e: PortfolioError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(TransactionsResponse {
        transactions,
        limit: transaction_limit(is_premium),
        is_premium,
    }))
}

/// 거래 등록 핸들러
#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 200, description = "Transaction recorded", body = CreateTransactionResponse),
        (status = 400, description = "Invalid transaction"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 404, description = "Wallet not found or not owned by the user"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Transactions",
    security(("BearerAuth" = []))
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<Json<CreateTransactionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let transaction = app_state
        .portfolio_state
        .transaction_service
        .create_transaction(authenticated_user.user_id, request)
        .await
        .map_err(|e: PortfolioError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(CreateTransactionResponse {
        transaction,
        message: "Transaction recorded successfully".to_string(),
    }))
}

/// 거래 삭제 핸들러
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    params(
        ("id" = Uuid, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction deleted", body = DeleteTransactionResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 404, description = "Transaction not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Transactions",
    security(("BearerAuth" = []))
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteTransactionResponse>, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .portfolio_state
        .transaction_service
        .delete_transaction(authenticated_user.user_id, id)
        .await
        .map_err(|e: PortfolioError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(DeleteTransactionResponse {
        id,
        message: "Transaction deleted successfully".to_string(),
    }))
}

/// 대시보드 통계 핸들러
/// Portfolio stats handler (BRL sums for premium users only)
#[utoipa::path(
    get,
    path = "/api/transactions/stats",
    responses(
        (status = 200, description = "Stats computed", body = PortfolioStats),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Transactions",
    security(("BearerAuth" = []))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<PortfolioStats>, (StatusCode, Json<serde_json::Value>)> {
    let user_id = authenticated_user.user_id;
    let is_premium = fetch_premium_status(&app_state, user_id).await?;

    let wallet_count = app_state
        .wallet_state
        .wallet_service
        .count_user_wallets(user_id)
        .await
        .map_err(|e: WalletError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let stats = app_state
        .portfolio_state
        .transaction_service
        .portfolio_stats(user_id, wallet_count, is_premium)
        .await
        .map_err(|e: PortfolioError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(stats))
}
