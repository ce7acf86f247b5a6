use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use crate::domains::portfolio::models::{Transaction, TransactionType};
use crate::shared::errors::StoreError;

// 거래 내역 레포지토리
// TransactionRepository: handles all database operations for recorded transactions

const TRANSACTION_COLUMNS: &str = "id, user_id, wallet_id, transaction_type, crypto_symbol, amount, \
     price_brl, total_brl, tax_amount, transaction_date, created_at";

/// 저장할 거래 (검증 완료)
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: Uuid,
    pub wallet_id: Option<Uuid>,
    pub transaction_type: TransactionType,
    pub crypto_symbol: String,
    pub amount: Decimal,
    pub price_brl: Option<Decimal>,
    pub total_brl: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub transaction_date: DateTime<Utc>,
}

pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 거래 등록
    // Create transaction. wallet_id가 있으면 본인 지갑일 때만 저장, 아니면 None
    pub async fn create_transaction(&self, tx: &NewTransaction) -> Result<Option<Transaction>> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO transactions (user_id, wallet_id, transaction_type, crypto_symbol, amount,
                                      price_brl, total_brl, tax_amount, transaction_date, created_at)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10
            WHERE $2::uuid IS NULL
               OR EXISTS (SELECT 1 FROM wallets WHERE id = $2::uuid AND user_id = $1::uuid)
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(tx.user_id)
        .bind(tx.wallet_id)
        .bind(tx.transaction_type.as_str())
        .bind(&tx.crypto_symbol)
        .bind(tx.amount)
        .bind(tx.price_brl)
        .bind(tx.total_brl)
        .bind(tx.tax_amount)
        .bind(tx.transaction_date)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to create transaction")?;

        row.as_ref().map(map_transaction).transpose()
    }

    // 사용자 거래 목록 (거래일 최신순)
    // limit이 None이면 전체 조회 (통계용)
    pub async fn get_transactions_by_user_id(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM transactions
            WHERE user_id = $1
            ORDER BY transaction_date DESC
            LIMIT $2
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch transactions by user_id")?;

        rows.iter().map(map_transaction).collect()
    }

    // 거래 삭제 (본인 거래만)
    pub async fn delete_transaction(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete transaction")?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_transaction(row: &PgRow) -> Result<Transaction> {
    let transaction_type: String = row.get("transaction_type");
    let transaction_type = TransactionType::parse(&transaction_type).ok_or_else(|| {
        StoreError::CorruptRow {
            table: "transactions",
            detail: format!("unknown transaction_type '{}'", transaction_type),
        }
    })?;

    Ok(Transaction {
        id: row.get("id"),
        user_id: row.get("user_id"),
        wallet_id: row.get("wallet_id"),
        transaction_type,
        crypto_symbol: row.get("crypto_symbol"),
        amount: row.get("amount"),
        price_brl: row.get("price_brl"),
        total_brl: row.get("total_brl"),
        tax_amount: row.get("tax_amount"),
        transaction_date: row.get("transaction_date"),
        created_at: row.get("created_at"),
    })
}
