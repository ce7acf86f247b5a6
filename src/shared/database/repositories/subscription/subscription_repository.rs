use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domains::subscription::models::{premium_expiry, PlanType, Subscription, SubscriptionStatus};
use crate::shared::errors::StoreError;

// 구독 레포지토리
// SubscriptionRepository: one row per user, created on first activation

const SUBSCRIPTION_COLUMNS: &str =
    "user_id, plan_type, status, started_at, expires_at, txid, updated_at";

pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 사용자 구독 조회 (없으면 None)
    // Get subscription row of the user
    pub async fn get_subscription(&self, user_id: Uuid) -> Result<Option<Subscription>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM subscriptions WHERE user_id = $1",
            SUBSCRIPTION_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch subscription")?;

        row.as_ref().map(map_subscription).transpose()
    }

    // 프리미엄 활성화 (upsert)
    // Activate premium for 30 days starting at `started_at`
    pub async fn upsert_active_subscription(
        conn: &mut PgConnection,
        user_id: Uuid,
        txid: &str,
        started_at: DateTime<Utc>,
    ) -> Result<Subscription> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO subscriptions (user_id, plan_type, status, started_at, expires_at, txid, created_at, updated_at)
            VALUES ($1, 'premium', 'active', $2, $3, $4, $2, $2)
            ON CONFLICT (user_id) DO UPDATE
            SET plan_type = 'premium',
                status = 'active',
                started_at = EXCLUDED.started_at,
                expires_at = EXCLUDED.expires_at,
                txid = EXCLUDED.txid,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(user_id)
        .bind(started_at)
        .bind(premium_expiry(started_at))
        .bind(txid)
        .fetch_one(&mut *conn)
        .await
        .context("Failed to activate subscription")?;

        map_subscription(&row)
    }

    // 만료된 활성 구독을 free/inactive로 변경
    // Demote every active subscription whose expiry has passed, returns affected users
    pub async fn expire_subscriptions(&self, now: DateTime<Utc>) -> Result<Vec<Uuid>> {
        let rows = sqlx::query(
            r#"
            UPDATE subscriptions
            SET plan_type = 'free', status = 'inactive', updated_at = $1
            WHERE status = 'active' AND expires_at < $1
            RETURNING user_id
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .context("Failed to expire subscriptions")?;

        Ok(rows.iter().map(|row| row.get("user_id")).collect())
    }
}

fn map_subscription(row: &PgRow) -> Result<Subscription> {
    let plan_type: String = row.get("plan_type");
    let status: String = row.get("status");

    let plan_type = PlanType::parse(&plan_type).ok_or_else(|| StoreError::CorruptRow {
        table: "subscriptions",
        detail: format!("unknown plan_type '{}'", plan_type),
    })?;
    let status = SubscriptionStatus::parse(&status).ok_or_else(|| StoreError::CorruptRow {
        table: "subscriptions",
        detail: format!("unknown status '{}'", status),
    })?;

    Ok(Subscription {
        user_id: row.get("user_id"),
        plan_type,
        status,
        started_at: row.get("started_at"),
        expires_at: row.get("expires_at"),
        txid: row.get("txid"),
        updated_at: row.get("updated_at"),
    })
}
