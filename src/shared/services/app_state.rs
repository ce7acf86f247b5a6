use std::sync::Arc;
use anyhow::{Context, Result};
use crate::shared::clients::{PixGateway, PixGatewayClient};
use crate::shared::config::AppConfig;
use crate::shared::database::{BillingStore, Database, PgBillingStore};
use crate::domains::auth::services::{AuthState, JwtService};
use crate::domains::pix::services::PixState;
use crate::domains::subscription::services::SubscriptionState;
use crate::domains::wallet::services::WalletState;
use crate::domains::portfolio::services::PortfolioState;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 역할: NestJS의 Module에서 모든 Service를 주입하는 것과 유사
/// 게이트웨이 클라이언트와 저장소는 여기서 한 번만 만들어서 각 도메인에 공유
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    /// Database connection (shared)
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub auth_state: AuthState,
    pub pix_state: PixState,
    pub subscription_state: SubscriptionState,
    pub wallet_state: WalletState,
    pub portfolio_state: PortfolioState,
}

impl AppState {
    /// Create AppState with database and configuration
    /// 실제 PIX 게이트웨이 클라이언트 + PostgreSQL 저장소 사용
    pub fn new(db: Database, config: AppConfig) -> Result<Self> {
        let gateway = PixGatewayClient::new(config.pix.clone())
            .context("Failed to create PIX gateway client")?;
        let store = PgBillingStore::new(db.pool().clone());

        Ok(Self::with_components(db, config, Arc::new(gateway), Arc::new(store)))
    }

    /// 게이트웨이/저장소를 직접 주입 (테스트용 가짜 구현 포함)
    /// Compose the state from explicit gateway and store implementations
    pub fn with_components(
        db: Database,
        config: AppConfig,
        gateway: Arc<dyn PixGateway>,
        store: Arc<dyn BillingStore>,
    ) -> Self {
        // 1. 공유 서비스 생성 (JWT)
        let jwt_service = JwtService::new(&config.jwt_secret, &config.jwt_audience);

        // 2. 각 도메인 State 생성
        let auth_state = AuthState::new(jwt_service);
        let pix_state = PixState::new(
            gateway,
            store.clone(),
            config.premium_price,
            &config.webhook_secret,
        );
        let subscription_state =
            SubscriptionState::new(store, config.subscription_sweep_interval);
        let wallet_state = WalletState::new(db.clone());
        let portfolio_state = PortfolioState::new(db.clone());

        // 3. AppState 조합
        Self {
            db,
            config: Arc::new(config),
            auth_state,
            pix_state,
            subscription_state,
            wallet_state,
            portfolio_state,
        }
    }
}
