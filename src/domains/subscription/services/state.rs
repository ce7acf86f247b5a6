// Subscription domain state
// 구독 도메인 상태
use std::sync::Arc;
use tokio::time::Duration;
use crate::domains::subscription::services::{SubscriptionExpiryScheduler, SubscriptionService};
use crate::shared::database::BillingStore;

#[derive(Clone)]
pub struct SubscriptionState {
    pub subscription_service: SubscriptionService,
    /// 구독 만료 스케줄러 (main에서 start)
    pub expiry_scheduler: SubscriptionExpiryScheduler,
}

impl SubscriptionState {
    pub fn new(store: Arc<dyn BillingStore>, sweep_interval: Duration) -> Self {
        Self {
            subscription_service: SubscriptionService::new(store.clone()),
            expiry_scheduler: SubscriptionExpiryScheduler::new(store, sweep_interval),
        }
    }
}
