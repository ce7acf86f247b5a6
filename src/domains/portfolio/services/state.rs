// Portfolio domain state
// 거래 내역 도메인 상태
use crate::shared::database::Database;
use crate::domains::portfolio::services::TransactionService;

#[derive(Clone)]
pub struct PortfolioState {
    pub transaction_service: TransactionService,
}

impl PortfolioState {
    pub fn new(db: Database) -> Self {
        Self {
            transaction_service: TransactionService::new(db),
        }
    }
}
