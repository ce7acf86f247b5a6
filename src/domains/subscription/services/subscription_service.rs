use std::sync::Arc;
use uuid::Uuid;
use crate::domains::subscription::models::Subscription;
use crate::shared::database::BillingStore;
use crate::shared::errors::StoreError;

/// 구독 서비스
/// SubscriptionService: read side of the subscription (writes happen on charge confirmation)
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn BillingStore>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn BillingStore>) -> Self {
        Self { store }
    }

    /// 구독 조회 (행이 없으면 free/inactive)
    pub async fn get_subscription(&self, user_id: Uuid) -> Result<Subscription, StoreError> {
        Ok(self
            .store
            .get_subscription(user_id)
            .await?
            .unwrap_or_else(|| Subscription::free(user_id)))
    }

    /// 프리미엄 여부
    pub async fn is_premium(&self, user_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.get_subscription(user_id).await?.is_premium())
    }
}
