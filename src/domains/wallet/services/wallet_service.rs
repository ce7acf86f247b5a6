use crate::shared::database::{Database, WalletRepository};
use crate::domains::wallet::models::{Wallet, WalletType};
use crate::shared::errors::WalletError;
use tracing::info;
use uuid::Uuid;

/// 지갑 서비스
/// 역할: NestJS의 Service 같은 것
/// WalletService: registers and lists the wallets a user tracks (addresses only)
#[derive(Clone)]
pub struct WalletService {
    db: Database,
}

impl WalletService {
    /// 생성자
    /// Constructor
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 지갑 등록
    /// Register wallet. Address is trimmed and required, empty name becomes None
    pub async fn create_wallet(
        &self,
        user_id: Uuid,
        wallet_type: WalletType,
        wallet_address: &str,
        wallet_name: Option<&str>,
    ) -> Result<Wallet, WalletError> {
        let (address, name) = normalize_wallet_input(wallet_address, wallet_name)?;

        let wallet_repo = WalletRepository::new(self.db.pool().clone());
        let wallet = wallet_repo
            .create_wallet(user_id, wallet_type, &address, name.as_deref())
            .await
            .map_err(|e| WalletError::DatabaseError(format!("Failed to save wallet: {:#}", e)))?;

        info!(wallet_id = %wallet.id, user_id = %user_id, wallet_type = wallet_type.as_str(), "Wallet registered");
        Ok(wallet)
    }

    /// 사용자 지갑 목록 (최신순)
    /// Get all wallets for user
    pub async fn get_user_wallets(&self, user_id: Uuid) -> Result<Vec<Wallet>, WalletError> {
        let wallet_repo = WalletRepository::new(self.db.pool().clone());
        wallet_repo
            .get_wallets_by_user_id(user_id)
            .await
            .map_err(|e| WalletError::DatabaseError(format!("Failed to fetch wallets: {:#}", e)))
    }

    /// 사용자 지갑 개수 (통계용)
    pub async fn count_user_wallets(&self, user_id: Uuid) -> Result<usize, WalletError> {
        let wallet_repo = WalletRepository::new(self.db.pool().clone());
        let count = wallet_repo
            .count_wallets_by_user_id(user_id)
            .await
            .map_err(|e| WalletError::DatabaseError(format!("Failed to count wallets: {:#}", e)))?;

        Ok(count.max(0) as usize)
    }

    /// 지갑 삭제 (본인 지갑만, 다른 사용자 지갑은 NotFound)
    /// Delete wallet
    pub async fn delete_wallet(&self, user_id: Uuid, wallet_id: Uuid) -> Result<(), WalletError> {
        let wallet_repo = WalletRepository::new(self.db.pool().clone());
        let deleted = wallet_repo
            .delete_wallet(user_id, wallet_id)
            .await
            .map_err(|e| WalletError::DatabaseError(format!("Failed to delete wallet: {:#}", e)))?;

        if !deleted {
            return Err(WalletError::NotFound { id: wallet_id });
        }

        info!(wallet_id = %wallet_id, user_id = %user_id, "Wallet deleted");
        Ok(())
    }
}

/// 입력 정리: 주소 trim (필수), 빈 이름은 None
pub fn normalize_wallet_input(
    wallet_address: &str,
    wallet_name: Option<&str>,
) -> Result<(String, Option<String>), WalletError> {
    let address = wallet_address.trim();
    if address.is_empty() {
        return Err(WalletError::MissingAddress);
    }

    let name = wallet_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    Ok((address.to_string(), name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wallet_input() {
        let (address, name) = normalize_wallet_input("  0xabc  ", Some("  ")).unwrap();
        assert_eq!(address, "0xabc");
        assert_eq!(name, None);

        let (_, name) = normalize_wallet_input("0xabc", Some(" Main ")).unwrap();
        assert_eq!(name.as_deref(), Some("Main"));

        assert!(matches!(normalize_wallet_input("   ", None), Err(WalletError::MissingAddress)));
    }
}
