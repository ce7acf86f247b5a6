// =====================================================
// HTTP API 테스트 (PIX / webhook / 구독)
// =====================================================
// Router를 직접 호출 (oneshot), 가짜 게이트웨이 + 메모리 저장소
// =====================================================

mod common;
use common::*;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use cryptotax_api::domains::pix::models::RemoteChargeStatus;
use cryptotax_api::shared::database::BillingStore;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", token)
        .body(Body::empty())
        .unwrap()
}

fn webhook_request(body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/webhooks/pix")
        .header("Content-Type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("X-Webhook-Signature", signature);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_pix_routes_require_token() {
    let (app, _state, _gateway, _store) = build_test_app();

    let request = Request::builder()
        .uri("/api/pix/charges/pending")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, authed("GET", "/api/pix/charges/pending", "Bearer not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pending_charge_is_null_without_charges() {
    let (app, state, _gateway, _store) = build_test_app();
    let token = bearer_token(&state, Uuid::new_v4());

    let (status, body) = send(&app, authed("GET", "/api/pix/charges/pending", &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["charge"].is_null());
}

#[tokio::test]
async fn test_create_then_verify_charge() {
    let (app, state, gateway, _store) = build_test_app();
    let user = Uuid::new_v4();
    let token = bearer_token(&state, user);

    let (status, created) = send(&app, authed("POST", "/api/pix/charges", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["charge"]["status"], "pending");
    assert_eq!(created["charge"]["amount"], "20.00");
    let txid = created["charge"]["txid"].as_str().unwrap().to_string();

    // 아직 결제 전
    let verify_uri = format!("/api/pix/charges/{}/verify", txid);
    let (status, pending) = send(&app, authed("POST", &verify_uri, &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending["status"], "pending");
    assert_eq!(pending["gateway_status"], "ATIVA");

    gateway.set_status(&txid, RemoteChargeStatus::Concluida);
    let (status, paid) = send(&app, authed("POST", &verify_uri, &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["subscription"]["is_premium"], true);

    let (status, sub) = send(&app, authed("GET", "/api/subscriptions/me", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sub["subscription"]["plan_type"], "premium");
    assert_eq!(sub["subscription"]["status"], "active");
}

#[tokio::test]
async fn test_foreign_and_unknown_charge() {
    let (app, state, _gateway, _store) = build_test_app();
    let owner_token = bearer_token(&state, Uuid::new_v4());
    let other_token = bearer_token(&state, Uuid::new_v4());

    let (_, created) = send(&app, authed("POST", "/api/pix/charges", &owner_token)).await;
    let txid = created["charge"]["txid"].as_str().unwrap().to_string();

    let (status, _) = send(&app, authed("GET", &format!("/api/pix/charges/{}", txid), &other_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        authed("POST", "/api/pix/charges/PREMIUMunknown00000000000000000/verify", &owner_token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_gateway_failure_is_bad_gateway() {
    let (app, state, gateway, store) = build_test_app();
    gateway.set_fail_create(true);
    let token = bearer_token(&state, Uuid::new_v4());

    let (status, body) = send(&app, authed("POST", "/api/pix/charges", &token)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("400"));
    assert!(store.charges().is_empty());
}

#[tokio::test]
async fn test_subscription_defaults_to_free() {
    let (app, state, _gateway, _store) = build_test_app();
    let token = bearer_token(&state, Uuid::new_v4());

    let (status, body) = send(&app, authed("GET", "/api/subscriptions/me", &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_premium"], false);
    assert_eq!(body["subscription"]["plan_type"], "free");
    assert_eq!(body["subscription"]["status"], "inactive");
}

#[tokio::test]
async fn test_webhook_without_signature_is_rejected() {
    let (app, state, _gateway, store) = build_test_app();
    let user = Uuid::new_v4();
    let charge = state.pix_state.charge_service.create_charge(user).await.unwrap().charge;
    let body = webhook_body(&[(Some(charge.txid.as_str()), "20.00")]);

    let (status, _) = send(&app, webhook_request(&body, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, webhook_request(&body, Some("deadbeef"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 서명이 틀리면 아무것도 바뀌지 않음
    assert_eq!(store.activation_count(), 0);
    assert!(!store.find_charge_by_txid(&charge.txid).await.unwrap().unwrap().is_paid());
}

#[tokio::test]
async fn test_signed_webhook_activates_subscription() {
    let (app, state, _gateway, store) = build_test_app();
    let user = Uuid::new_v4();
    let charge = state.pix_state.charge_service.create_charge(user).await.unwrap().charge;
    let body = webhook_body(&[
        (Some(charge.txid.as_str()), "20.00"),
        (Some("PREMIUMunknown00000000000000000"), "20.00"),
    ]);
    let signature = format!("sha256={}", sign_webhook(&body));

    let (status, ack) = send(&app, webhook_request(&body, Some(&signature))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["success"], true);
    assert_eq!(ack["report"]["received"], 2);
    assert_eq!(ack["report"]["activated"], 1);
    assert_eq!(ack["report"]["unmatched"], 1);
    assert!(store.get_subscription(user).await.unwrap().unwrap().is_premium());
}

#[tokio::test]
async fn test_signed_malformed_webhook_is_bad_request() {
    let (app, _state, _gateway, _store) = build_test_app();
    let body = r#"{"pix": "not-a-list"#;
    let signature = sign_webhook(body);

    let (status, _) = send(&app, webhook_request(body, Some(&signature))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_auth_me_returns_token_subject() {
    let (app, state, _gateway, _store) = build_test_app();
    let user = Uuid::new_v4();
    let token = bearer_token(&state, user);

    let (status, body) = send(&app, authed("GET", "/api/auth/me", &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user.to_string());
    assert_eq!(body["email"], "user@example.com");
}
