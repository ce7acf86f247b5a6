use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;
use crate::domains::pix::models::{NewPixCharge, PixCharge, PixChargeStatus};
use crate::domains::subscription::models::{PlanType, Subscription, SubscriptionStatus};
use crate::shared::database::store::{BillingStore, ConfirmOutcome};
use crate::shared::errors::StoreError;

#[derive(Default)]
struct Tables {
    charges: HashMap<String, PixCharge>,
    /// 삽입 순서 (txid)
    order: Vec<String>,
    subscriptions: HashMap<Uuid, Subscription>,
    /// 활성화 이력 (txid)
    activations: Vec<String>,
}

/// 메모리 결제 저장소
/// In-process BillingStore used by tests and local runs without a database.
/// 하나의 Mutex 아래에서 상태 변경과 구독 활성화를 같이 처리함
#[derive(Default)]
pub struct MemoryBillingStore {
    tables: Mutex<Tables>,
    fail_inserts: AtomicBool,
}

impl MemoryBillingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이후 insert_charge 호출을 실패시킴
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// 지금까지 구독 활성화 횟수
    pub fn activation_count(&self) -> usize {
        self.tables.lock().activations.len()
    }

    pub fn seed_subscription(&self, subscription: Subscription) {
        self.tables
            .lock()
            .subscriptions
            .insert(subscription.user_id, subscription);
    }

    /// 구독 없이 paid 상태만 남은 충전 요청 주입 (반쯤 적용된 상태 재현용)
    pub fn seed_charge(&self, charge: PixCharge) {
        let mut tables = self.tables.lock();
        tables.order.push(charge.txid.clone());
        tables.charges.insert(charge.txid.clone(), charge);
    }

    pub fn charges(&self) -> Vec<PixCharge> {
        self.tables.lock().charges.values().cloned().collect()
    }
}

#[async_trait]
impl BillingStore for MemoryBillingStore {
    async fn insert_charge(&self, charge: NewPixCharge) -> Result<PixCharge, StoreError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Database("insert rejected".to_string()));
        }

        let mut tables = self.tables.lock();
        if tables.charges.contains_key(&charge.txid) {
            return Err(StoreError::Database(format!(
                "duplicate key value violates unique constraint: txid={}",
                charge.txid
            )));
        }

        let now = Utc::now();
        let stored = PixCharge {
            id: Uuid::new_v4(),
            user_id: charge.user_id,
            txid: charge.txid,
            amount: charge.amount,
            qr_code_payload: charge.qr_code_payload,
            qr_code_image: charge.qr_code_image,
            status: PixChargeStatus::Pending,
            activated_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.order.push(stored.txid.clone());
        tables.charges.insert(stored.txid.clone(), stored.clone());

        Ok(stored)
    }

    async fn find_charge_by_txid(&self, txid: &str) -> Result<Option<PixCharge>, StoreError> {
        Ok(self.tables.lock().charges.get(txid).cloned())
    }

    async fn latest_pending_charge(&self, user_id: Uuid) -> Result<Option<PixCharge>, StoreError> {
        let tables = self.tables.lock();
        // 같은 시각에 만들어진 요청도 나중에 삽입된 것이 우선
        Ok(tables
            .order
            .iter()
            .rev()
            .filter_map(|txid| tables.charges.get(txid))
            .find(|c| c.user_id == user_id && c.status == PixChargeStatus::Pending)
            .cloned())
    }

    async fn confirm_charge(
        &self,
        txid: &str,
        paid_at: DateTime<Utc>,
    ) -> Result<ConfirmOutcome, StoreError> {
        let mut tables = self.tables.lock();

        let charge = match tables.charges.get_mut(txid) {
            None => return Ok(ConfirmOutcome::NotFound),
            Some(charge) if charge.is_paid() => {
                return Ok(ConfirmOutcome::AlreadyPaid(charge.clone()))
            }
            Some(charge) => {
                charge.status = PixChargeStatus::Paid;
                charge.activated_at = Some(paid_at);
                charge.updated_at = paid_at;
                charge.clone()
            }
        };

        let subscription = Subscription::activated(charge.user_id, txid, paid_at);
        tables.subscriptions.insert(charge.user_id, subscription.clone());
        tables.activations.push(txid.to_string());

        Ok(ConfirmOutcome::Confirmed { charge, subscription })
    }

    async fn get_subscription(&self, user_id: Uuid) -> Result<Option<Subscription>, StoreError> {
        Ok(self.tables.lock().subscriptions.get(&user_id).cloned())
    }

    async fn apply_paid_charge(
        &self,
        txid: &str,
        started_at: DateTime<Utc>,
    ) -> Result<Option<Subscription>, StoreError> {
        let mut tables = self.tables.lock();

        let user_id = match tables.charges.get_mut(txid) {
            Some(charge) if charge.needs_activation() => {
                charge.activated_at = Some(started_at);
                charge.updated_at = started_at;
                charge.user_id
            }
            _ => return Ok(None),
        };

        let subscription = Subscription::activated(user_id, txid, started_at);
        tables.subscriptions.insert(user_id, subscription.clone());
        tables.activations.push(txid.to_string());

        Ok(Some(subscription))
    }

    async fn expire_subscriptions(&self, now: DateTime<Utc>) -> Result<Vec<Uuid>, StoreError> {
        let mut tables = self.tables.lock();
        let mut expired = Vec::new();

        for sub in tables.subscriptions.values_mut() {
            if sub.is_expired_at(now) {
                sub.plan_type = PlanType::Free;
                sub.status = SubscriptionStatus::Inactive;
                sub.updated_at = now;
                expired.push(sub.user_id);
            }
        }

        Ok(expired)
    }
}
