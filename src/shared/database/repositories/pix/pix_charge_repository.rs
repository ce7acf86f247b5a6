use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domains::pix::models::{NewPixCharge, PixCharge, PixChargeStatus};
use crate::shared::errors::StoreError;

// PIX 충전 요청 레포지토리
// PixChargeRepository: handles all database operations for PIX charges

const CHARGE_COLUMNS: &str =
    "id, user_id, txid, amount, qr_code_payload, qr_code_image, status, activated_at, created_at, updated_at";

pub struct PixChargeRepository {
    pool: PgPool,
}

impl PixChargeRepository {
    // 레포지토리 생성
    // Create repository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 충전 요청 저장 (status=pending)
    // Insert a new pending charge
    pub async fn create_charge(&self, charge: &NewPixCharge) -> Result<PixCharge> {
        let now = Utc::now();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO pix_charges (user_id, txid, amount, qr_code_payload, qr_code_image, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7)
            RETURNING {}
            "#,
            CHARGE_COLUMNS
        ))
        .bind(charge.user_id)
        .bind(&charge.txid)
        .bind(charge.amount)
        .bind(&charge.qr_code_payload)
        .bind(&charge.qr_code_image)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create PIX charge")?;

        map_charge(&row)
    }

    // txid로 조회
    // Get charge by txid
    pub async fn get_charge_by_txid(&self, txid: &str) -> Result<Option<PixCharge>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM pix_charges WHERE txid = $1",
            CHARGE_COLUMNS
        ))
        .bind(txid)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch PIX charge by txid")?;

        row.as_ref().map(map_charge).transpose()
    }

    // 가장 최근 대기 중인 충전 요청
    // Most recently created pending charge of the user
    pub async fn get_latest_pending_charge(&self, user_id: Uuid) -> Result<Option<PixCharge>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM pix_charges
            WHERE user_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            CHARGE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch pending PIX charge")?;

        row.as_ref().map(map_charge).transpose()
    }

    // 행 잠금 조회 (트랜잭션 안에서만 사용)
    // Lock the charge row for the rest of the transaction
    pub async fn lock_charge_by_txid(conn: &mut PgConnection, txid: &str) -> Result<Option<PixCharge>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM pix_charges WHERE txid = $1 FOR UPDATE",
            CHARGE_COLUMNS
        ))
        .bind(txid)
        .fetch_optional(&mut *conn)
        .await
        .context("Failed to lock PIX charge")?;

        row.as_ref().map(map_charge).transpose()
    }

    // pending → paid (compare-and-set)
    // 이미 paid면 None
    pub async fn mark_charge_paid(
        conn: &mut PgConnection,
        txid: &str,
        paid_at: DateTime<Utc>,
    ) -> Result<Option<PixCharge>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE pix_charges
            SET status = 'paid', activated_at = $2, updated_at = $2
            WHERE txid = $1 AND status <> 'paid'
            RETURNING {}
            "#,
            CHARGE_COLUMNS
        ))
        .bind(txid)
        .bind(paid_at)
        .fetch_optional(&mut *conn)
        .await
        .context("Failed to mark PIX charge as paid")?;

        row.as_ref().map(map_charge).transpose()
    }

    // paid 충전 요청의 활성화 기록 선점 (compare-and-set)
    // 이미 반영됐거나 paid가 아니면 None
    pub async fn claim_activation(
        conn: &mut PgConnection,
        txid: &str,
        activated_at: DateTime<Utc>,
    ) -> Result<Option<PixCharge>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE pix_charges
            SET activated_at = $2, updated_at = $2
            WHERE txid = $1 AND status = 'paid' AND activated_at IS NULL
            RETURNING {}
            "#,
            CHARGE_COLUMNS
        ))
        .bind(txid)
        .bind(activated_at)
        .fetch_optional(&mut *conn)
        .await
        .context("Failed to claim PIX charge activation")?;

        row.as_ref().map(map_charge).transpose()
    }
}

fn map_charge(row: &PgRow) -> Result<PixCharge> {
    let status: String = row.get("status");
    let status = PixChargeStatus::parse(&status).ok_or_else(|| StoreError::CorruptRow {
        table: "pix_charges",
        detail: format!("unknown status '{}'", status),
    })?;

    Ok(PixCharge {
        id: row.get("id"),
        user_id: row.get("user_id"),
        txid: row.get("txid"),
        amount: row.get("amount"),
        qr_code_payload: row.get("qr_code_payload"),
        qr_code_image: row.get("qr_code_image"),
        status,
        activated_at: row.get("activated_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
