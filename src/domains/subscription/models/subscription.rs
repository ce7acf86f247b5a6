use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// 프리미엄 유효 기간 (일)
/// Validity window granted by one paid charge
pub const PREMIUM_PERIOD_DAYS: i64 = 30;

/// 요금제
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Free,
    Premium,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::Premium => "premium",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "free" => Some(PlanType::Free),
            "premium" => Some(PlanType::Premium),
            _ => None,
        }
    }
}

/// 구독 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Inactive,
    Active,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Inactive => "inactive",
            SubscriptionStatus::Active => "active",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inactive" => Some(SubscriptionStatus::Inactive),
            "active" => Some(SubscriptionStatus::Active),
            _ => None,
        }
    }
}

/// 사용자 구독 (사용자당 1개)
/// User subscription, one row per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = Subscription)]
pub struct Subscription {
    pub user_id: Uuid,
    pub plan_type: PlanType,
    pub status: SubscriptionStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    /// 마지막 활성화를 일으킨 충전 요청 (감사용)
    pub txid: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// 행이 없는 사용자용 기본값 (free / inactive)
    /// View used when the user has no subscription row yet
    pub fn free(user_id: Uuid) -> Self {
        Self {
            user_id,
            plan_type: PlanType::Free,
            status: SubscriptionStatus::Inactive,
            started_at: None,
            expires_at: None,
            txid: None,
            updated_at: Utc::now(),
        }
    }

    /// txid 결제로 활성화된 프리미엄 구독
    /// Premium subscription activated at `started_at` by `txid`
    pub fn activated(user_id: Uuid, txid: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            plan_type: PlanType::Premium,
            status: SubscriptionStatus::Active,
            started_at: Some(started_at),
            expires_at: Some(premium_expiry(started_at)),
            txid: Some(txid.to_string()),
            updated_at: started_at,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.plan_type == PlanType::Premium && self.status == SubscriptionStatus::Active
    }

    /// 활성 상태인데 만료 시각이 지남 (스윕 대상)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active
            && self.expires_at.map(|exp| exp < now).unwrap_or(false)
    }
}

/// 만료 시각 = 시작 시각 + 30일
pub fn premium_expiry(started_at: DateTime<Utc>) -> DateTime<Utc> {
    started_at + Duration::days(PREMIUM_PERIOD_DAYS)
}

/// 구독 조회 응답
/// Subscription view returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(as = SubscriptionResponse)]
pub struct SubscriptionResponse {
    pub subscription: Subscription,
    pub is_premium: bool,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        let is_premium = subscription.is_premium();
        Self { subscription, is_premium }
    }
}
