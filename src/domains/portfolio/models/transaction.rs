use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// 무료 사용자 조회 한도
pub const FREE_TRANSACTION_LIMIT: i64 = 5;
/// 프리미엄 사용자 조회 한도
pub const PREMIUM_TRANSACTION_LIMIT: i64 = 100;

/// 거래 종류
/// Transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Buy,
    Sell,
    Swap,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "buy",
            TransactionType::Sell => "sell",
            TransactionType::Swap => "swap",
            TransactionType::Transfer => "transfer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "buy" => Some(TransactionType::Buy),
            "sell" => Some(TransactionType::Sell),
            "swap" => Some(TransactionType::Swap),
            "transfer" => Some(TransactionType::Transfer),
            _ => None,
        }
    }
}

/// 암호화폐 거래 내역
/// Recorded crypto transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(as = Transaction)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub wallet_id: Option<Uuid>,
    pub transaction_type: TransactionType,

    #[schema(example = "BTC")]
    pub crypto_symbol: String,

    #[schema(value_type = String, example = "0.015")]
    pub amount: Decimal,

    /// 단가 (BRL)
    #[schema(value_type = Option<String>, example = "350000.00")]
    pub price_brl: Option<Decimal>,

    /// 총액 (BRL)
    #[schema(value_type = Option<String>, example = "5250.00")]
    pub total_brl: Option<Decimal>,

    /// 세금 (BRL)
    #[schema(value_type = Option<String>, example = "0.00")]
    pub tax_amount: Option<Decimal>,

    pub transaction_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// 무료 사용자에게는 BRL 금액 숨김
    /// Strip fiat values for free users
    pub fn without_fiat(mut self) -> Self {
        self.price_brl = None;
        self.total_brl = None;
        self.tax_amount = None;
        self
    }
}

/// 거래 등록 요청
/// Create transaction request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(as = CreateTransactionRequest)]
pub struct CreateTransactionRequest {
    pub wallet_id: Option<Uuid>,
    pub transaction_type: TransactionType,

    #[schema(example = "BTC")]
    pub crypto_symbol: String,

    #[schema(value_type = String, example = "0.015")]
    pub amount: Decimal,

    #[schema(value_type = Option<String>)]
    pub price_brl: Option<Decimal>,

    #[schema(value_type = Option<String>)]
    pub total_brl: Option<Decimal>,

    #[schema(value_type = Option<String>)]
    pub tax_amount: Option<Decimal>,

    /// 없으면 현재 시각
    pub transaction_date: Option<DateTime<Utc>>,
}

/// 거래 목록 응답
/// Transactions list response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = TransactionsResponse)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,

    /// 적용된 조회 한도 (무료 5, 프리미엄 100)
    #[schema(example = 5)]
    pub limit: i64,

    pub is_premium: bool,
}

/// 거래 등록 응답
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = CreateTransactionResponse)]
pub struct CreateTransactionResponse {
    pub transaction: Transaction,
    pub message: String,
}

/// 거래 삭제 응답
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = DeleteTransactionResponse)]
pub struct DeleteTransactionResponse {
    pub id: Uuid,
    pub message: String,
}
