use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 지갑 종류
/// Wallet provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    Metamask,
    Trust,
    Binance,
    Coinbase,
    Other,
}

impl WalletType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::Metamask => "metamask",
            WalletType::Trust => "trust",
            WalletType::Binance => "binance",
            WalletType::Coinbase => "coinbase",
            WalletType::Other => "other",
        }
    }

    /// 모르는 값은 Other로 처리
    pub fn parse(value: &str) -> Self {
        match value {
            "metamask" => WalletType::Metamask,
            "trust" => WalletType::Trust,
            "binance" => WalletType::Binance,
            "coinbase" => WalletType::Coinbase,
            _ => WalletType::Other,
        }
    }
}

/// 등록된 지갑
/// Wallet registered by a user (tracking only, no keys stored)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = Wallet)]
pub struct Wallet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub wallet_type: WalletType,

    /// 지갑 주소
    #[schema(example = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e")]
    pub wallet_address: String,

    #[schema(example = "Main wallet")]
    pub wallet_name: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// 지갑 등록 요청
/// Create wallet request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = CreateWalletRequest)]
pub struct CreateWalletRequest {
    pub wallet_type: WalletType,

    #[schema(example = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e")]
    pub wallet_address: String,

    #[schema(example = "Main wallet")]
    pub wallet_name: Option<String>,
}

/// 지갑 등록 응답
/// Create wallet response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = CreateWalletResponse)]
pub struct CreateWalletResponse {
    pub wallet: Wallet,
    pub message: String,
}

/// 지갑 목록 응답
/// Get wallets response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = WalletsResponse)]
pub struct WalletsResponse {
    pub wallets: Vec<Wallet>,
}

/// 지갑 삭제 응답
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = DeleteWalletResponse)]
pub struct DeleteWalletResponse {
    pub id: Uuid,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_type_serde() {
        let req: CreateWalletRequest = serde_json::from_str(
            r#"{"wallet_type":"metamask","wallet_address":"0xabc"}"#,
        )
        .unwrap();

        assert_eq!(req.wallet_type, WalletType::Metamask);
        assert!(req.wallet_name.is_none());
        assert_eq!(WalletType::parse("ledger"), WalletType::Other);
    }
}
