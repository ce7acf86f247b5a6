use crate::domains::pix::models::{PixWebhookPayload, WebhookAckResponse};
use crate::domains::pix::services::SIGNATURE_HEADER;
use crate::shared::services::AppState;
use crate::shared::errors::PaymentError;
use axum::{body::Bytes, extract::State, http::{HeaderMap, StatusCode}, Json};
use tracing::warn;

/// PIX webhook 핸들러 (JWT 없음, HMAC 서명 필요)
/// Gateway webhook handler. Signature is checked on the raw body before parsing.
#[utoipa::path(
    post,
    path = "/api/webhooks/pix",
    request_body = PixWebhookPayload,
    params(
        ("X-Webhook-Signature" = String, Header, description = "hex HMAC-SHA256 of the raw body, optional 'sha256=' prefix")
    ),
    responses(
        (status = 200, description = "Batch drained", body = WebhookAckResponse),
        (status = 400, description = "Malformed payload"),
        (status = 401, description = "Missing or invalid signature")
    ),
    tag = "Webhooks"
)]
pub async fn pix_webhook(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAckResponse>, (StatusCode, Json<serde_json::Value>)> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    app_state
        .pix_state
        .webhook_verifier
        .verify(&body, signature)
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) {
            warn!(has_signature = signature.is_some(), "PIX webhook rejected: invalid signature");
            e.into()
        })?;

    let payload: PixWebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| -> (StatusCode, Json<serde_json::Value>) {
            PaymentError::InvalidPayload(e.to_string()).into()
        })?;

    let report = app_state.pix_state.charge_service.handle_webhook(payload).await;

    Ok(Json(WebhookAckResponse { success: true, report }))
}
