use async_trait::async_trait;
use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use crate::domains::pix::models::{NewPixCharge, PixCharge};
use crate::domains::subscription::models::Subscription;
use crate::shared::database::repositories::{PixChargeRepository, SubscriptionRepository};
use crate::shared::database::store::{BillingStore, ConfirmOutcome};
use crate::shared::errors::StoreError;

/// PostgreSQL 결제 저장소
/// BillingStore backed by PostgreSQL
#[derive(Clone)]
pub struct PgBillingStore {
    pool: PgPool,
}

impl PgBillingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn confirm_in_transaction(
        &self,
        txid: &str,
        paid_at: DateTime<Utc>,
    ) -> anyhow::Result<ConfirmOutcome> {
        // 트랜잭션 시작
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        // 1. 행 잠금 (같은 txid의 동시 전달은 여기서 직렬화됨)
        let locked = PixChargeRepository::lock_charge_by_txid(&mut *tx, txid).await?;
        let charge = match locked {
            None => return Ok(ConfirmOutcome::NotFound),
            Some(charge) if charge.is_paid() => return Ok(ConfirmOutcome::AlreadyPaid(charge)),
            Some(charge) => charge,
        };

        // 2. pending → paid
        let paid = match PixChargeRepository::mark_charge_paid(&mut *tx, txid, paid_at).await? {
            Some(paid) => paid,
            None => return Ok(ConfirmOutcome::AlreadyPaid(charge)),
        };

        // 3. 구독 활성화
        let subscription = SubscriptionRepository::upsert_active_subscription(
            &mut *tx,
            paid.user_id,
            txid,
            paid_at,
        )
        .await?;

        // 4. 커밋
        tx.commit().await.context("Failed to commit charge confirmation")?;

        Ok(ConfirmOutcome::Confirmed { charge: paid, subscription })
    }

    async fn apply_in_transaction(
        &self,
        txid: &str,
        started_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<Subscription>> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        // 활성화 기록을 먼저 선점: 동시 복구 요청 중 하나만 통과
        let charge = match PixChargeRepository::claim_activation(&mut *tx, txid, started_at).await? {
            Some(charge) => charge,
            None => return Ok(None),
        };

        let subscription = SubscriptionRepository::upsert_active_subscription(
            &mut *tx,
            charge.user_id,
            txid,
            started_at,
        )
        .await?;

        tx.commit().await.context("Failed to commit charge activation")?;

        Ok(Some(subscription))
    }
}

#[async_trait]
impl BillingStore for PgBillingStore {
    async fn insert_charge(&self, charge: NewPixCharge) -> Result<PixCharge, StoreError> {
        let repo = PixChargeRepository::new(self.pool.clone());
        Ok(repo.create_charge(&charge).await?)
    }

    async fn find_charge_by_txid(&self, txid: &str) -> Result<Option<PixCharge>, StoreError> {
        let repo = PixChargeRepository::new(self.pool.clone());
        Ok(repo.get_charge_by_txid(txid).await?)
    }

    async fn latest_pending_charge(&self, user_id: Uuid) -> Result<Option<PixCharge>, StoreError> {
        let repo = PixChargeRepository::new(self.pool.clone());
        Ok(repo.get_latest_pending_charge(user_id).await?)
    }

    async fn confirm_charge(
        &self,
        txid: &str,
        paid_at: DateTime<Utc>,
    ) -> Result<ConfirmOutcome, StoreError> {
        // 에러 시 트랜잭션은 drop되면서 롤백됨
        Ok(self.confirm_in_transaction(txid, paid_at).await?)
    }

    async fn get_subscription(&self, user_id: Uuid) -> Result<Option<Subscription>, StoreError> {
        let repo = SubscriptionRepository::new(self.pool.clone());
        Ok(repo.get_subscription(user_id).await?)
    }

    async fn apply_paid_charge(
        &self,
        txid: &str,
        started_at: DateTime<Utc>,
    ) -> Result<Option<Subscription>, StoreError> {
        Ok(self.apply_in_transaction(txid, started_at).await?)
    }

    async fn expire_subscriptions(&self, now: DateTime<Utc>) -> Result<Vec<Uuid>, StoreError> {
        let repo = SubscriptionRepository::new(self.pool.clone());
        Ok(repo.expire_subscriptions(now).await?)
    }
}
