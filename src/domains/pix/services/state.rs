// PIX domain state
// PIX 결제 도메인 상태
use std::sync::Arc;
use rust_decimal::Decimal;
use crate::domains::pix::services::{ChargeService, WebhookVerifier};
use crate::shared::clients::PixGateway;
use crate::shared::database::BillingStore;

/// PIX domain state
/// 게이트웨이와 저장소는 합성 루트에서 주입됨 (테스트에서는 가짜 구현)
#[derive(Clone)]
pub struct PixState {
    pub charge_service: ChargeService,
    pub webhook_verifier: WebhookVerifier,
}

impl PixState {
    pub fn new(
        gateway: Arc<dyn PixGateway>,
        store: Arc<dyn BillingStore>,
        premium_price: Decimal,
        webhook_secret: &str,
    ) -> Self {
        Self {
            charge_service: ChargeService::new(gateway, store, premium_price),
            webhook_verifier: WebhookVerifier::new(webhook_secret),
        }
    }
}
