use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;
use crate::domains::wallet::models::{Wallet, WalletType};

// 지갑 레포지토리
// 역할: NestJS의 Repository 같은 것
// WalletRepository: handles all database operations for tracked wallets

pub struct WalletRepository {
    pool: PgPool,
}

impl WalletRepository {
    // 레포지토리 생성
    // Create repository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 지갑 등록
    // Create wallet
    pub async fn create_wallet(
        &self,
        user_id: Uuid,
        wallet_type: WalletType,
        wallet_address: &str,
        wallet_name: Option<&str>,
    ) -> Result<Wallet> {
        let row = sqlx::query(
            r#"
            INSERT INTO wallets (user_id, wallet_type, wallet_address, wallet_name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, wallet_type, wallet_address, wallet_name, created_at
            "#,
        )
        .bind(user_id)
        .bind(wallet_type.as_str())
        .bind(wallet_address)
        .bind(wallet_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create wallet")?;

        Ok(map_wallet(&row))
    }

    // 사용자 ID로 지갑 목록 조회 (최신순)
    // Get wallets by user ID, newest first
    pub async fn get_wallets_by_user_id(&self, user_id: Uuid) -> Result<Vec<Wallet>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, wallet_type, wallet_address, wallet_name, created_at
            FROM wallets
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch wallets by user_id")?;

        Ok(rows.iter().map(map_wallet).collect())
    }

    // 사용자 지갑 개수
    pub async fn count_wallets_by_user_id(&self, user_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM wallets WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count wallets")?;

        Ok(count)
    }

    // 지갑 삭제 (본인 지갑만)
    // Delete wallet owned by the user, returns false when nothing matched
    pub async fn delete_wallet(&self, user_id: Uuid, wallet_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM wallets WHERE id = $1 AND user_id = $2")
            .bind(wallet_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete wallet")?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_wallet(row: &PgRow) -> Wallet {
    let wallet_type: String = row.get("wallet_type");
    Wallet {
        id: row.get("id"),
        user_id: row.get("user_id"),
        wallet_type: WalletType::parse(&wallet_type),
        wallet_address: row.get("wallet_address"),
        wallet_name: row.get("wallet_name"),
        created_at: row.get("created_at"),
    }
}
