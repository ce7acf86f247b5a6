use serde::Serialize;
use utoipa::ToSchema;
use rust_decimal::Decimal;
use super::Transaction;

/// 포트폴리오 통계
/// Dashboard stats. Fiat sums are only present for premium users.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(as = PortfolioStats)]
pub struct PortfolioStats {
    pub total_transactions: usize,
    pub total_wallets: usize,

    /// 총 거래액 (BRL, 프리미엄 전용)
    #[schema(value_type = Option<String>, example = "15250.00")]
    pub total_value_brl: Option<Decimal>,

    /// 총 세금 (BRL, 프리미엄 전용)
    #[schema(value_type = Option<String>, example = "120.50")]
    pub total_tax_brl: Option<Decimal>,

    pub is_premium: bool,
}

impl PortfolioStats {
    /// 거래 목록으로 통계 계산 (값이 없으면 0으로 계산)
    pub fn from_transactions(
        transactions: &[Transaction],
        total_wallets: usize,
        is_premium: bool,
    ) -> Self {
        let (total_value_brl, total_tax_brl) = if is_premium {
            let value = transactions
                .iter()
                .map(|t| t.total_brl.unwrap_or(Decimal::ZERO))
                .sum::<Decimal>();
            let tax = transactions
                .iter()
                .map(|t| t.tax_amount.unwrap_or(Decimal::ZERO))
                .sum::<Decimal>();
            (Some(value), Some(tax))
        } else {
            (None, None)
        };

        Self {
            total_transactions: transactions.len(),
            total_wallets,
            total_value_brl,
            total_tax_brl,
            is_premium,
        }
    }
}
