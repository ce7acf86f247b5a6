use std::str::FromStr;
use std::sync::Arc;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use crate::domains::pix::models::{
    NewPixCharge, PixCharge, PixWebhookEntry, PixWebhookPayload, RemoteChargeStatus,
    WebhookEntryOutcome, WebhookReport,
};
use crate::domains::subscription::models::Subscription;
use crate::shared::clients::PixGateway;
use crate::shared::database::{BillingStore, ConfirmOutcome};
use crate::shared::errors::PaymentError;

/// 결제 확인 결과
/// Outcome of a polled verification
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    /// 결제 완료 (구독 활성 상태)
    Paid {
        charge: PixCharge,
        subscription: Subscription,
    },
    /// 아직 결제 전 (게이트웨이 원본 상태 포함)
    Pending {
        charge: PixCharge,
        gateway_status: RemoteChargeStatus,
    },
}

/// 생성된 충전 요청
#[derive(Debug, Clone)]
pub struct CreatedCharge {
    pub charge: PixCharge,
    pub expires_in_secs: Option<u32>,
}

/// PIX 충전 요청 서비스
/// 역할: 충전 요청 생성 → 결제 확인(polling / webhook) → 구독 활성화
/// ChargeService: drives the charge lifecycle NoCharge → Pending → Paid
#[derive(Clone)]
pub struct ChargeService {
    gateway: Arc<dyn PixGateway>,
    store: Arc<dyn BillingStore>,
    premium_price: Decimal,
}

impl ChargeService {
    pub fn new(
        gateway: Arc<dyn PixGateway>,
        store: Arc<dyn BillingStore>,
        premium_price: Decimal,
    ) -> Self {
        Self { gateway, store, premium_price }
    }

    pub fn premium_price(&self) -> Decimal {
        self.premium_price
    }

    /// 프리미엄 충전 요청 생성
    /// Create a premium charge for the user.
    /// 이전 pending 충전 요청은 그대로 두고 새 요청이 "현재" 요청이 됨
    pub async fn create_charge(&self, user_id: Uuid) -> Result<CreatedCharge, PaymentError> {
        let amount = validate_amount(self.premium_price)?;

        // 1. 게이트웨이에 cob 생성
        let descriptor = self
            .gateway
            .create_charge(amount, &user_id.to_string())
            .await?;

        // 2. 로컬 저장
        let new_charge = NewPixCharge {
            user_id,
            txid: descriptor.txid.clone(),
            amount,
            qr_code_payload: descriptor.br_code,
            qr_code_image: descriptor.qr_code_image,
        };

        let charge = self.store.insert_charge(new_charge).await.map_err(|e| {
            // 게이트웨이에는 cob가 이미 있음: 결제가 들어올 수 있으므로 반드시 기록
            error!(
                txid = %descriptor.txid,
                user_id = %user_id,
                amount = %amount,
                error = %e,
                "PIX charge created at gateway but not persisted locally"
            );
            PaymentError::from(e)
        })?;

        info!(txid = %charge.txid, user_id = %user_id, amount = %amount, "PIX charge created");

        Ok(CreatedCharge {
            charge,
            expires_in_secs: descriptor.expiration_secs,
        })
    }

    /// 현재 대기 중인 충전 요청 (가장 최근 pending)
    pub async fn get_pending_charge(&self, user_id: Uuid) -> Result<Option<PixCharge>, PaymentError> {
        Ok(self.store.latest_pending_charge(user_id).await?)
    }

    /// txid로 본인 충전 요청 조회
    pub async fn get_charge(&self, user_id: Uuid, txid: &str) -> Result<PixCharge, PaymentError> {
        let charge = self
            .store
            .find_charge_by_txid(txid)
            .await?
            .ok_or_else(|| PaymentError::ChargeNotFound { txid: txid.to_string() })?;

        if charge.user_id != user_id {
            return Err(PaymentError::Forbidden);
        }

        Ok(charge)
    }

    /// 결제 확인 (polling)
    /// Verify a charge against the gateway and activate the subscription when paid
    pub async fn verify_charge(&self, user_id: Uuid, txid: &str) -> Result<VerifyOutcome, PaymentError> {
        let charge = self.get_charge(user_id, txid).await?;

        if charge.is_paid() {
            let subscription = self.ensure_activation(&charge).await?;
            return Ok(VerifyOutcome::Paid { charge, subscription });
        }

        let gateway_status = self.gateway.get_charge_status(txid).await?;
        if !gateway_status.is_completed() {
            debug!(txid, status = gateway_status.as_str(), "PIX charge still pending");
            return Ok(VerifyOutcome::Pending { charge, gateway_status });
        }

        match self.store.confirm_charge(txid, Utc::now()).await? {
            ConfirmOutcome::Confirmed { charge, subscription } => {
                info!(txid, user_id = %charge.user_id, "PIX charge confirmed by polling, premium activated");
                Ok(VerifyOutcome::Paid { charge, subscription })
            }
            // webhook이 먼저 처리한 경우
            ConfirmOutcome::AlreadyPaid(charge) => {
                let subscription = self.ensure_activation(&charge).await?;
                Ok(VerifyOutcome::Paid { charge, subscription })
            }
            ConfirmOutcome::NotFound => Err(PaymentError::ChargeNotFound { txid: txid.to_string() }),
        }
    }

    /// paid 충전 요청의 구독 활성화 보장
    /// 충전 요청마다 한 번만 반영됨: 이미 반영된 요청은 만료된 구독을 다시 연장하지 않음
    async fn ensure_activation(&self, charge: &PixCharge) -> Result<Subscription, PaymentError> {
        if charge.needs_activation() {
            if let Some(subscription) = self
                .store
                .apply_paid_charge(&charge.txid, Utc::now())
                .await?
            {
                warn!(
                    txid = %charge.txid,
                    user_id = %charge.user_id,
                    "Paid PIX charge without activation, subscription re-activated"
                );
                return Ok(subscription);
            }
        }

        Ok(self
            .store
            .get_subscription(charge.user_id)
            .await?
            .unwrap_or_else(|| Subscription::free(charge.user_id)))
    }

    /// Webhook 배치 처리
    /// Drain a webhook batch. Entries are independent: one failure never aborts the rest.
    pub async fn handle_webhook(&self, payload: PixWebhookPayload) -> WebhookReport {
        let mut report = WebhookReport::default();

        for entry in &payload.pix {
            let outcome = self.process_webhook_entry(entry).await;
            report.record(outcome);
        }

        info!(
            received = report.received,
            activated = report.activated,
            already_paid = report.already_paid,
            unmatched = report.unmatched,
            missing_txid = report.missing_txid,
            failed = report.failed,
            "PIX webhook batch processed"
        );

        report
    }

    async fn process_webhook_entry(&self, entry: &PixWebhookEntry) -> WebhookEntryOutcome {
        let txid = match entry.txid.as_deref().map(str::trim) {
            Some(txid) if !txid.is_empty() => txid,
            _ => {
                warn!(
                    end_to_end_id = entry.end_to_end_id.as_deref().unwrap_or("-"),
                    valor = %entry.valor,
                    "PIX webhook entry without txid skipped"
                );
                return WebhookEntryOutcome::MissingTxid;
            }
        };

        match self.store.confirm_charge(txid, Utc::now()).await {
            Ok(ConfirmOutcome::Confirmed { charge, .. }) => {
                check_paid_amount(&charge, &entry.valor);
                info!(
                    txid,
                    user_id = %charge.user_id,
                    horario = %entry.horario,
                    "PIX charge confirmed by webhook, premium activated"
                );
                WebhookEntryOutcome::Activated
            }
            Ok(ConfirmOutcome::AlreadyPaid(_)) => {
                debug!(txid, "PIX webhook entry for already paid charge ignored");
                WebhookEntryOutcome::AlreadyPaid
            }
            Ok(ConfirmOutcome::NotFound) => {
                warn!(txid, valor = %entry.valor, "PIX webhook entry for unknown txid");
                WebhookEntryOutcome::Unmatched
            }
            Err(e) => {
                error!(txid, error = %e, "Failed to apply PIX webhook entry");
                WebhookEntryOutcome::Failed
            }
        }
    }
}

/// 금액 검증: 양수, 소수점 2자리 이하
pub fn validate_amount(amount: Decimal) -> Result<Decimal, PaymentError> {
    if amount <= Decimal::ZERO || amount.normalize().scale() > 2 {
        return Err(PaymentError::InvalidAmount(amount.to_string()));
    }
    Ok(amount.round_dp(2))
}

// 결제 금액이 다르면 경고만 남김 (활성화는 유지)
fn check_paid_amount(charge: &PixCharge, valor: &str) {
    match Decimal::from_str(valor.trim()) {
        Ok(paid) if paid == charge.amount => {}
        Ok(paid) => warn!(
            txid = %charge.txid,
            expected = %charge.amount,
            paid = %paid,
            "PIX webhook amount differs from charge amount"
        ),
        Err(_) => warn!(txid = %charge.txid, valor, "PIX webhook amount is not a decimal"),
    }
}
