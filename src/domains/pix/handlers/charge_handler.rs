use crate::domains::pix::models::{
    ChargeResponse, CreateChargeResponse, PendingChargeResponse, PixChargeStatus,
    VerifyChargeResponse,
};
use crate::domains::pix::services::VerifyOutcome;
use crate::shared::services::AppState;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::errors::PaymentError;
use axum::{extract::{Path, State}, http::StatusCode, Json};

/// 충전 요청 생성 핸들러
/// Create PIX charge handler (premium price, user from JWT)
#[utoipa::path(
    post,
    path = "/api/pix/charges",
    responses(
        (status = 200, description = "Charge created", body = CreateChargeResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 502, description = "PIX gateway error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "PIX",
    security(("BearerAuth" = []))
)]
pub async fn create_charge(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<CreateChargeResponse>, (StatusCode, Json<serde_json::Value>)> {
    let created = app_state
        .pix_state
        .charge_service
        .create_charge(authenticated_user.user_id)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(CreateChargeResponse {
        charge: created.charge,
        expires_in_secs: created.expires_in_secs,
        message: "PIX charge created. Pay using the QR code or the copy-and-paste code".to_string(),
    }))
}

/// 현재 대기 중인 충전 요청 조회 핸들러
/// Get current pending charge handler
#[utoipa::path(
    get,
    path = "/api/pix/charges/pending",
    responses(
        (status = 200, description = "Current pending charge (null when none)", body = PendingChargeResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "PIX",
    security(("BearerAuth" = []))
)]
pub async fn get_pending_charge(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<PendingChargeResponse>, (StatusCode, Json<serde_json::Value>)> {
    let charge = app_state
        .pix_state
        .charge_service
        .get_pending_charge(authenticated_user.user_id)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(PendingChargeResponse { charge }))
}

/// txid로 충전 요청 조회 핸들러
#[utoipa::path(
    get,
    path = "/api/pix/charges/{txid}",
    params(
        ("txid" = String, Path, description = "Charge txid")
    ),
    responses(
        (status = 200, description = "Charge retrieved", body = ChargeResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 403, description = "Charge belongs to another user"),
        (status = 404, description = "Charge not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "PIX",
    security(("BearerAuth" = []))
)]
pub async fn get_charge(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(txid): Path<String>,
) -> Result<Json<ChargeResponse>, (StatusCode, Json<serde_json::Value>)> {
    let charge = app_state
        .pix_state
        .charge_service
        .get_charge(authenticated_user.user_id, &txid)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(ChargeResponse { charge }))
}

/// 결제 확인 핸들러 (polling)
/// Verify charge handler: asks the gateway and activates premium when paid
#[utoipa::path(
    post,
    path = "/api/pix/charges/{txid}/verify",
    params(
        ("txid" = String, Path, description = "Charge txid")
    ),
    responses(
        (status = 200, description = "Verification result (paid or pending)", body = VerifyChargeResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 403, description = "Charge belongs to another user"),
        (status = 404, description = "Charge not found"),
        (status = 502, description = "PIX gateway error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "PIX",
    security(("BearerAuth" = []))
)]
pub async fn verify_charge(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(txid): Path<String>,
) -> Result<Json<VerifyChargeResponse>, (StatusCode, Json<serde_json::Value>)> {
    let outcome = app_state
        .pix_state
        .charge_service
        .verify_charge(authenticated_user.user_id, &txid)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let response = match outcome {
        VerifyOutcome::Paid { charge, subscription } => VerifyChargeResponse {
            txid: charge.txid,
            status: PixChargeStatus::Paid,
            gateway_status: None,
            subscription: Some(subscription.into()),
            message: "Payment confirmed. Premium activated".to_string(),
        },
        VerifyOutcome::Pending { charge, gateway_status } => VerifyChargeResponse {
            txid: charge.txid,
            status: PixChargeStatus::Pending,
            gateway_status: Some(gateway_status.as_str().to_string()),
            subscription: None,
            message: "Payment not received yet".to_string(),
        },
    };

    Ok(Json(response))
}
