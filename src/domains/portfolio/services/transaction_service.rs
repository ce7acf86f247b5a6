use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;
use crate::domains::portfolio::models::{
    CreateTransactionRequest, PortfolioStats, Transaction, FREE_TRANSACTION_LIMIT,
    PREMIUM_TRANSACTION_LIMIT,
};
use crate::shared::database::{Database, NewTransaction, TransactionRepository};
use crate::shared::errors::PortfolioError;

/// 거래 내역 서비스
/// TransactionService: transaction history and dashboard stats, gated by premium status
#[derive(Clone)]
pub struct TransactionService {
    db: Database,
}

impl TransactionService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repository(&self) -> TransactionRepository {
        TransactionRepository::new(self.db.pool().clone())
    }

    /// 거래 목록 (무료 5건, 프리미엄 100건)
    /// 무료 사용자는 BRL 금액이 제거됨
    pub async fn list_transactions(
        &self,
        user_id: Uuid,
        is_premium: bool,
    ) -> Result<Vec<Transaction>, PortfolioError> {
        let rows = self
            .repository()
            .get_transactions_by_user_id(user_id, Some(transaction_limit(is_premium)))
            .await
            .map_err(|e| PortfolioError::DatabaseError(format!("{:#}", e)))?;

        Ok(apply_visibility(rows, is_premium))
    }

    /// 거래 등록
    pub async fn create_transaction(
        &self,
        user_id: Uuid,
        request: CreateTransactionRequest,
    ) -> Result<Transaction, PortfolioError> {
        let new_tx = validate_transaction(user_id, request)?;

        let created = self
            .repository()
            .create_transaction(&new_tx)
            .await
            .map_err(|e| PortfolioError::DatabaseError(format!("{:#}", e)))?;
        let transaction = require_owned_wallet(created, new_tx.wallet_id)?;

        info!(
            transaction_id = %transaction.id,
            user_id = %user_id,
            symbol = %transaction.crypto_symbol,
            "Transaction recorded"
        );
        Ok(transaction)
    }

    /// 거래 삭제 (본인 거래만)
    pub async fn delete_transaction(&self, user_id: Uuid, id: Uuid) -> Result<(), PortfolioError> {
        let deleted = self
            .repository()
            .delete_transaction(user_id, id)
            .await
            .map_err(|e| PortfolioError::DatabaseError(format!("{:#}", e)))?;

        if !deleted {
            return Err(PortfolioError::NotFound { id });
        }
        Ok(())
    }

    /// 대시보드 통계 (전체 거래 기준)
    pub async fn portfolio_stats(
        &self,
        user_id: Uuid,
        wallet_count: usize,
        is_premium: bool,
    ) -> Result<PortfolioStats, PortfolioError> {
        let rows = self
            .repository()
            .get_transactions_by_user_id(user_id, None)
            .await
            .map_err(|e| PortfolioError::DatabaseError(format!("{:#}", e)))?;

        Ok(PortfolioStats::from_transactions(&rows, wallet_count, is_premium))
    }
}

pub fn transaction_limit(is_premium: bool) -> i64 {
    if is_premium {
        PREMIUM_TRANSACTION_LIMIT
    } else {
        FREE_TRANSACTION_LIMIT
    }
}

/// 무료 사용자: 최대 5건 + BRL 금액 숨김
pub fn apply_visibility(rows: Vec<Transaction>, is_premium: bool) -> Vec<Transaction> {
    let limit = transaction_limit(is_premium) as usize;
    rows.into_iter()
        .take(limit)
        .map(|tx| if is_premium { tx } else { tx.without_fiat() })
        .collect()
}

/// 지갑 소유권 조건으로 저장이 거부되면 WalletNotFound
pub fn require_owned_wallet(
    created: Option<Transaction>,
    wallet_id: Option<Uuid>,
) -> Result<Transaction, PortfolioError> {
    match (created, wallet_id) {
        (Some(transaction), _) => Ok(transaction),
        (None, Some(id)) => Err(PortfolioError::WalletNotFound { id }),
        (None, None) => Err(PortfolioError::DatabaseError(
            "transaction insert returned no row".to_string(),
        )),
    }
}

/// 요청 검증: 수량 > 0, 심볼 필수 (대문자로 저장), BRL 금액은 음수 불가
pub fn validate_transaction(
    user_id: Uuid,
    request: CreateTransactionRequest,
) -> Result<NewTransaction, PortfolioError> {
    let symbol = request.crypto_symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(PortfolioError::Invalid("crypto_symbol is required".to_string()));
    }
    if request.amount <= Decimal::ZERO {
        return Err(PortfolioError::Invalid("amount must be greater than zero".to_string()));
    }

    let fiat = [
        ("price_brl", request.price_brl),
        ("total_brl", request.total_brl),
        ("tax_amount", request.tax_amount),
    ];
    if let Some((field, _)) = fiat
        .iter()
        .find(|(_, value)| value.map(|v| v < Decimal::ZERO).unwrap_or(false))
    {
        return Err(PortfolioError::Invalid(format!("{} must not be negative", field)));
    }

    Ok(NewTransaction {
        user_id,
        wallet_id: request.wallet_id,
        transaction_type: request.transaction_type,
        crypto_symbol: symbol,
        amount: request.amount,
        price_brl: request.price_brl,
        total_brl: request.total_brl,
        tax_amount: request.tax_amount,
        transaction_date: request.transaction_date.unwrap_or_else(Utc::now),
    })
}
