use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};
use uuid::Uuid;
use crate::shared::database::BillingStore;
use crate::shared::errors::StoreError;

/// 구독 만료 스케줄러
/// Subscription Expiry Scheduler
///
/// 역할:
/// - 주기적으로 만료된 프리미엄 구독을 free/inactive로 변경
/// - enable/disable로 실행 여부 제어 가능
///
/// 처리 흐름:
/// 1. start() 시 백그라운드 태스크 실행
/// 2. 매 주기마다 expires_at < now 인 활성 구독 정리
/// 3. 에러는 로그만 남기고 다음 주기에 다시 시도
#[derive(Clone)]
pub struct SubscriptionExpiryScheduler {
    store: Arc<dyn BillingStore>,

    /// 실행 주기
    period: Duration,

    /// 스케줄러 활성화 상태
    enabled: Arc<AtomicBool>,
}

impl SubscriptionExpiryScheduler {
    /// 새 스케줄러 생성 (기본값: 활성화)
    pub fn new(store: Arc<dyn BillingStore>, period: Duration) -> Self {
        Self {
            store,
            period,
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// 스케줄러 시작
    /// Start scheduler
    pub fn start(&self) -> JoinHandle<()> {
        let scheduler = self.clone();

        tokio::spawn(async move {
            let mut ticker = interval(scheduler.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                // 활성화 상태 확인
                if !scheduler.is_enabled() {
                    continue;
                }

                if let Err(e) = scheduler.sweep_once().await {
                    error!(error = %e, "Subscription expiry sweep failed");
                }
            }
        })
    }

    /// 한 번 정리 실행
    /// Run one sweep, returns demoted users
    pub async fn sweep_once(&self) -> Result<Vec<Uuid>, StoreError> {
        let expired = self.store.expire_subscriptions(Utc::now()).await?;

        if !expired.is_empty() {
            info!(count = expired.len(), users = ?expired, "Expired premium subscriptions demoted");
        }

        Ok(expired)
    }

    /// 스케줄러 활성화
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// 스케줄러 비활성화
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use crate::domains::subscription::models::Subscription;
    use crate::shared::database::MemoryBillingStore;

    #[tokio::test]
    async fn test_sweep_demotes_only_expired_active() {
        let store = Arc::new(MemoryBillingStore::new());
        let expired_user = Uuid::new_v4();
        let active_user = Uuid::new_v4();
        let free_user = Uuid::new_v4();

        store.seed_subscription(Subscription::activated(
            expired_user,
            "PREMIUMold",
            Utc::now() - ChronoDuration::days(31),
        ));
        store.seed_subscription(Subscription::activated(active_user, "PREMIUMnew", Utc::now()));
        store.seed_subscription(Subscription::free(free_user));

        let scheduler = SubscriptionExpiryScheduler::new(store.clone(), Duration::from_secs(3600));
        let demoted = scheduler.sweep_once().await.unwrap();

        assert_eq!(demoted, vec![expired_user]);
        assert!(!store.get_subscription(expired_user).await.unwrap().unwrap().is_premium());
        assert!(store.get_subscription(active_user).await.unwrap().unwrap().is_premium());
    }

    #[test]
    fn test_enable_disable() {
        let store = Arc::new(MemoryBillingStore::new());
        let scheduler = SubscriptionExpiryScheduler::new(store, Duration::from_secs(60));

        assert!(scheduler.is_enabled());
        scheduler.disable();
        assert!(!scheduler.is_enabled());
        scheduler.enable();
        assert!(scheduler.is_enabled());
    }
}
