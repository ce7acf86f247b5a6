// =====================================================
// PIX 충전 요청 생명주기 테스트
// =====================================================
// 생성 → 결제 확인(polling / webhook) → 구독 활성화
// 메모리 저장소 + 가짜 게이트웨이 사용 (DB 불필요)
// =====================================================

mod common;
use common::*;

use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use cryptotax_api::domains::pix::models::{PixCharge, PixChargeStatus, PixWebhookPayload, RemoteChargeStatus};
use cryptotax_api::domains::pix::services::{ChargeService, VerifyOutcome};
use cryptotax_api::domains::subscription::models::{PlanType, Subscription, SubscriptionStatus};
use cryptotax_api::shared::database::{BillingStore, ConfirmOutcome, MemoryBillingStore};
use cryptotax_api::shared::errors::PaymentError;

fn payload(body: &str) -> PixWebhookPayload {
    serde_json::from_str(body).expect("valid webhook body")
}

/// 테스트: 같은 사용자가 연속으로 만든 충전 요청은 txid가 다름
#[tokio::test]
async fn test_back_to_back_charges_get_distinct_txids() {
    let (service, gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();

    let first = service.create_charge(user).await.unwrap();
    let second = service.create_charge(user).await.unwrap();

    assert_ne!(first.charge.txid, second.charge.txid);
    assert_eq!(first.charge.amount, Decimal::new(2000, 2));
    assert_eq!(first.charge.status, PixChargeStatus::Pending);
    assert_eq!(first.expires_in_secs, Some(3600));
    assert_eq!(gateway.created_count(), 2);

    // 현재 대기 중인 요청은 가장 최근 것
    let pending = service.get_pending_charge(user).await.unwrap().unwrap();
    assert_eq!(pending.txid, second.charge.txid);
    assert_eq!(store.charges().len(), 2);
}

/// 테스트: CONCLUIDA → 충전 요청 paid + 구독 premium/active, 만료 = 시작 + 30일
#[tokio::test]
async fn test_verify_concluida_activates_premium() {
    let (service, gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    let created = service.create_charge(user).await.unwrap();
    let txid = created.charge.txid.clone();

    gateway.set_status(&txid, RemoteChargeStatus::Concluida);
    let outcome = service.verify_charge(user, &txid).await.unwrap();

    let subscription = match outcome {
        VerifyOutcome::Paid { charge, subscription } => {
            assert_eq!(charge.status, PixChargeStatus::Paid);
            subscription
        }
        other => panic!("expected paid, got {:?}", other),
    };

    assert_eq!(subscription.plan_type, PlanType::Premium);
    assert_eq!(subscription.status, SubscriptionStatus::Active);
    assert_eq!(subscription.txid.as_deref(), Some(txid.as_str()));
    assert_eq!(
        subscription.expires_at.unwrap() - subscription.started_at.unwrap(),
        Duration::days(30)
    );
    assert_eq!(store.activation_count(), 1);
}

/// 테스트: CONCLUIDA 외의 상태 → 변경 없음, pending 응답
#[tokio::test]
async fn test_verify_other_statuses_do_not_mutate() {
    let (service, gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    let txid = service.create_charge(user).await.unwrap().charge.txid;

    for status in [
        RemoteChargeStatus::Ativa,
        RemoteChargeStatus::RemovidaPeloUsuarioRecebedor,
        RemoteChargeStatus::RemovidaPeloPsp,
        RemoteChargeStatus::Unknown("EM_PROCESSAMENTO".to_string()),
    ] {
        gateway.set_status(&txid, status.clone());
        match service.verify_charge(user, &txid).await.unwrap() {
            VerifyOutcome::Pending { charge, gateway_status } => {
                assert_eq!(charge.status, PixChargeStatus::Pending);
                assert_eq!(gateway_status, status);
            }
            other => panic!("expected pending, got {:?}", other),
        }
    }

    assert_eq!(store.activation_count(), 0);
    assert!(store.get_subscription(user).await.unwrap().is_none());
}

/// 테스트: paid 상태는 되돌아가지 않음 (게이트웨이가 다른 상태를 말해도)
#[tokio::test]
async fn test_paid_never_reverts() {
    let (service, gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    let txid = service.create_charge(user).await.unwrap().charge.txid;

    gateway.set_status(&txid, RemoteChargeStatus::Concluida);
    service.verify_charge(user, &txid).await.unwrap();

    gateway.set_status(&txid, RemoteChargeStatus::RemovidaPeloPsp);
    let calls_before = gateway.status_call_count();
    let outcome = service.verify_charge(user, &txid).await.unwrap();

    assert!(matches!(outcome, VerifyOutcome::Paid { .. }));
    // 로컬에서 이미 paid면 게이트웨이를 다시 호출하지 않음
    assert_eq!(gateway.status_call_count(), calls_before);
    assert_eq!(
        store.find_charge_by_txid(&txid).await.unwrap().unwrap().status,
        PixChargeStatus::Paid
    );
    assert_eq!(store.activation_count(), 1);
}

/// 테스트: 모르는 txid → NotFound, 다른 사용자 → Forbidden
#[tokio::test]
async fn test_verify_unknown_and_foreign_charge() {
    let (service, _gateway, _store) = setup_charge_service();
    let owner = Uuid::new_v4();
    let txid = service.create_charge(owner).await.unwrap().charge.txid;

    let unknown = service.verify_charge(owner, "PREMIUMdoesnotexist0000000000000").await;
    assert!(matches!(unknown, Err(PaymentError::ChargeNotFound { .. })));

    let foreign = service.verify_charge(Uuid::new_v4(), &txid).await;
    assert!(matches!(foreign, Err(PaymentError::Forbidden)));
}

/// 테스트: 게이트웨이 실패 → Gateway 에러, 아무것도 저장되지 않음
#[tokio::test]
async fn test_gateway_failure_on_create() {
    let (service, gateway, store) = setup_charge_service();
    gateway.set_fail_create(true);

    let result = service.create_charge(Uuid::new_v4()).await;

    match result {
        Err(PaymentError::Gateway(e)) => assert!(e.to_string().contains("Cobrança inválida")),
        other => panic!("expected gateway error, got {:?}", other.map(|c| c.charge.txid)),
    }
    assert!(store.charges().is_empty());
}

/// 테스트: 게이트웨이 생성 후 저장 실패 → Store 에러 (원격 cob는 남음)
#[tokio::test]
async fn test_store_failure_after_remote_create() {
    let (service, gateway, store) = setup_charge_service();
    store.set_fail_inserts(true);

    let result = service.create_charge(Uuid::new_v4()).await;

    assert!(matches!(result, Err(PaymentError::Store(_))));
    assert_eq!(gateway.created_count(), 1);
    assert!(store.charges().is_empty());
}

/// 테스트: 설정된 가격이 잘못되면 게이트웨이 호출 전에 거부
#[tokio::test]
async fn test_invalid_price_rejected_before_gateway() {
    let gateway = Arc::new(FakeGateway::new());
    let store = Arc::new(MemoryBillingStore::new());
    let service = ChargeService::new(gateway.clone(), store, Decimal::new(10001, 3));

    let result = service.create_charge(Uuid::new_v4()).await;

    assert!(matches!(result, Err(PaymentError::InvalidAmount(_))));
    assert_eq!(gateway.created_count(), 0);
}

/// 테스트: 매칭되는 txid 1개 + 모르는 txid 1개 → 매칭 사용자만 활성화, 전체 성공
#[tokio::test]
async fn test_webhook_batch_with_matched_and_unmatched() {
    let (service, _gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    let txid = service.create_charge(user).await.unwrap().charge.txid;

    let body = webhook_body(&[
        (Some(txid.as_str()), "20.00"),
        (Some("PREMIUMunknown00000000000000000"), "20.00"),
        (None, "5.00"),
    ]);
    let report = service.handle_webhook(payload(&body)).await;

    assert_eq!(report.received, 3);
    assert_eq!(report.activated, 1);
    assert_eq!(report.unmatched, 1);
    assert_eq!(report.missing_txid, 1);
    assert_eq!(report.failed, 0);

    let subscription = store.get_subscription(user).await.unwrap().unwrap();
    assert!(subscription.is_premium());
}

/// 테스트: 이미 paid 된 txid의 webhook 재전송 → 추가 변경 없음
#[tokio::test]
async fn test_webhook_replay_is_idempotent() {
    let (service, _gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    let txid = service.create_charge(user).await.unwrap().charge.txid;
    let body = webhook_body(&[(Some(txid.as_str()), "20.00")]);

    let first = service.handle_webhook(payload(&body)).await;
    let before = store.get_subscription(user).await.unwrap().unwrap();

    let replay = service.handle_webhook(payload(&body)).await;
    let after = store.get_subscription(user).await.unwrap().unwrap();

    assert_eq!(first.activated, 1);
    assert_eq!(replay.activated, 0);
    assert_eq!(replay.already_paid, 1);
    assert_eq!(before, after);
    assert_eq!(store.activation_count(), 1);
}

/// 테스트: 같은 txid 동시 전달 → 정확히 한 번만 활성화
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deliveries_activate_once() {
    let (service, _gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    let txid = service.create_charge(user).await.unwrap().charge.txid;
    let body = webhook_body(&[(Some(txid.as_str()), "20.00")]);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let service = service.clone();
        let batch = payload(&body);
        handles.push(tokio::spawn(async move { service.handle_webhook(batch).await }));
    }

    let mut activated = 0;
    let mut already_paid = 0;
    for handle in handles {
        let report = handle.await.unwrap();
        activated += report.activated;
        already_paid += report.already_paid;
    }

    assert_eq!(activated, 1);
    assert_eq!(already_paid, 15);
    assert_eq!(store.activation_count(), 1);
}

/// 테스트: webhook이 먼저 처리한 뒤 polling → paid, 추가 활성화 없음
#[tokio::test]
async fn test_verify_after_webhook_does_not_reactivate() {
    let (service, gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    let txid = service.create_charge(user).await.unwrap().charge.txid;

    service
        .handle_webhook(payload(&webhook_body(&[(Some(txid.as_str()), "20.00")])))
        .await;
    gateway.set_status(&txid, RemoteChargeStatus::Concluida);

    let outcome = service.verify_charge(user, &txid).await.unwrap();

    assert!(matches!(outcome, VerifyOutcome::Paid { .. }));
    assert_eq!(store.activation_count(), 1);
}

fn paid_charge(user_id: Uuid, txid: &str, activated_at: Option<DateTime<Utc>>) -> PixCharge {
    PixCharge {
        id: Uuid::new_v4(),
        user_id,
        txid: txid.to_string(),
        amount: premium_price(),
        qr_code_payload: "000201".to_string(),
        qr_code_image: None,
        status: PixChargeStatus::Paid,
        activated_at,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// 테스트: paid인데 구독이 없는 상태 → verify가 복구
#[tokio::test]
async fn test_verify_repairs_half_applied_state() {
    let (service, _gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    store.seed_charge(paid_charge(user, "PREMIUMhalfapplied00000000000001", None));

    let outcome = service
        .verify_charge(user, "PREMIUMhalfapplied00000000000001")
        .await
        .unwrap();

    match outcome {
        VerifyOutcome::Paid { subscription, .. } => assert!(subscription.is_premium()),
        other => panic!("expected paid, got {:?}", other),
    }
    assert_eq!(store.activation_count(), 1);
}

/// 테스트: 이미 이 txid로 활성화 후 만료된 구독은 다시 연장하지 않음
#[tokio::test]
async fn test_verify_does_not_extend_expired_activation() {
    let (service, _gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    let txid = "PREMIUMexpired000000000000000001";
    let started = Utc::now() - Duration::days(40);
    store.seed_charge(paid_charge(user, txid, Some(started)));

    let mut expired = Subscription::activated(user, txid, started);
    expired.plan_type = PlanType::Free;
    expired.status = SubscriptionStatus::Inactive;
    store.seed_subscription(expired);

    match service.verify_charge(user, txid).await.unwrap() {
        VerifyOutcome::Paid { subscription, .. } => assert!(!subscription.is_premium()),
        other => panic!("expected paid, got {:?}", other),
    }
    assert_eq!(store.activation_count(), 0);
}

/// 테스트: 이미 반영된 paid 충전 요청 2건을 만료 후 번갈아 verify → 추가 프리미엄 없음
#[tokio::test]
async fn test_alternating_verify_of_consumed_charges_grants_nothing() {
    let (service, _gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    let first = "PREMIUMconsumedA000000000000001";
    let second = "PREMIUMconsumedB000000000000002";
    let started = Utc::now() - Duration::days(70);
    store.seed_charge(paid_charge(user, first, Some(started)));
    store.seed_charge(paid_charge(user, second, Some(started + Duration::days(31))));

    // 마지막 활성화(second)도 만료되어 스윕된 상태
    let mut swept = Subscription::activated(user, second, started + Duration::days(31));
    swept.plan_type = PlanType::Free;
    swept.status = SubscriptionStatus::Inactive;
    store.seed_subscription(swept);

    for round in 0..4 {
        let txid = if round % 2 == 0 { first } else { second };
        match service.verify_charge(user, txid).await.unwrap() {
            VerifyOutcome::Paid { subscription, .. } => assert!(!subscription.is_premium()),
            other => panic!("expected paid, got {:?}", other),
        }
        store
            .expire_subscriptions(Utc::now() + Duration::days(31 * (round + 1)))
            .await
            .unwrap();
    }

    assert_eq!(store.activation_count(), 0);
    let subscription = store.get_subscription(user).await.unwrap().unwrap();
    assert!(!subscription.is_premium());
    assert_eq!(subscription.txid.as_deref(), Some(second));
}

/// 테스트: 반쯤 적용된 충전 요청에 동시 verify → 정확히 한 번만 복구
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_repairs_activate_once() {
    let (service, _gateway, store) = setup_charge_service();
    let user = Uuid::new_v4();
    let txid = "PREMIUMrepairrace00000000000001";
    store.seed_charge(paid_charge(user, txid, None));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move { service.verify_charge(user, txid).await }));
    }
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            VerifyOutcome::Paid { subscription, .. } => assert!(subscription.is_premium()),
            other => panic!("expected paid, got {:?}", other),
        }
    }

    assert_eq!(store.activation_count(), 1);
}

/// 테스트: 저장소 confirm 결과 (원자적 compare-and-set)
#[tokio::test]
async fn test_store_confirm_unknown_txid() {
    let store = MemoryBillingStore::new();
    let outcome = store.confirm_charge("PREMIUMnothing", Utc::now()).await.unwrap();
    assert_eq!(outcome, ConfirmOutcome::NotFound);
}
