use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domains::pix::models::{NewPixCharge, PixCharge};
use crate::domains::subscription::models::Subscription;
use crate::shared::errors::StoreError;

/// 결제 확인 결과
/// Result of the pending → paid compare-and-set
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// 이번 호출이 상태를 바꿈 (충전 요청 paid + 구독 활성화)
    Confirmed {
        charge: PixCharge,
        subscription: Subscription,
    },
    /// 이미 paid (변경 없음)
    AlreadyPaid(PixCharge),
    /// 해당 txid 없음
    NotFound,
}

/// 충전 요청 + 구독 저장소
/// Persistence seam of the charge lifecycle
///
/// `confirm_charge`는 충전 요청 상태 변경과 구독 활성화를 하나의 원자적 연산으로 수행해야 함.
/// 같은 txid에 대한 동시 호출 중 정확히 하나만 `Confirmed`를 받음.
#[async_trait]
pub trait BillingStore: Send + Sync {
    async fn insert_charge(&self, charge: NewPixCharge) -> Result<PixCharge, StoreError>;

    async fn find_charge_by_txid(&self, txid: &str) -> Result<Option<PixCharge>, StoreError>;

    async fn latest_pending_charge(&self, user_id: Uuid) -> Result<Option<PixCharge>, StoreError>;

    async fn confirm_charge(
        &self,
        txid: &str,
        paid_at: DateTime<Utc>,
    ) -> Result<ConfirmOutcome, StoreError>;

    async fn get_subscription(&self, user_id: Uuid) -> Result<Option<Subscription>, StoreError>;

    /// paid 이지만 구독에 반영되지 않은 충전 요청을 반영 (반쯤 적용된 상태 복구)
    /// Apply a paid charge that never reached the subscription. Each charge is applied
    /// at most once: `None` when it was already applied or is not paid.
    async fn apply_paid_charge(
        &self,
        txid: &str,
        started_at: DateTime<Utc>,
    ) -> Result<Option<Subscription>, StoreError>;

    /// 만료된 활성 구독을 free/inactive로 변경하고 해당 사용자 목록 반환
    async fn expire_subscriptions(&self, now: DateTime<Utc>) -> Result<Vec<Uuid>, StoreError>;
}
