use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use crate::domains::subscription::models::SubscriptionResponse;

/// PIX 충전 요청 상태
/// PIX charge status. Monotonic: `Paid` never reverts to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PixChargeStatus {
    Pending,
    Paid,
}

impl PixChargeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PixChargeStatus::Pending => "pending",
            PixChargeStatus::Paid => "paid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(PixChargeStatus::Pending),
            "paid" => Some(PixChargeStatus::Paid),
            _ => None,
        }
    }
}

/// DB 저장용 PIX 충전 요청 모델
/// Locally persisted PIX charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(as = PixCharge)]
pub struct PixCharge {
    pub id: Uuid,

    /// 소유 사용자 ID
    /// Owning user
    pub user_id: Uuid,

    /// 게이트웨이 txid (UNIQUE, 게이트웨이 리소스와의 조인 키)
    #[schema(example = "PREMIUMa1b2c3d41735689600000")]
    pub txid: String,

    /// 금액 (BRL, 소수점 2자리)
    #[schema(value_type = String, example = "10.00")]
    pub amount: Decimal,

    /// BR Code payload (복사/붙여넣기용)
    pub qr_code_payload: String,

    /// QR 이미지 (없으면 payload를 보여줘야 함)
    pub qr_code_image: Option<String>,

    pub status: PixChargeStatus,

    /// 이 충전 요청으로 구독을 활성화한 시각 (한 번만 설정됨)
    /// Set once, when this charge's payment is applied to the subscription
    pub activated_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PixCharge {
    pub fn is_paid(&self) -> bool {
        self.status == PixChargeStatus::Paid
    }

    /// paid 인데 아직 구독에 반영되지 않음
    pub fn needs_activation(&self) -> bool {
        self.is_paid() && self.activated_at.is_none()
    }
}

/// 새 충전 요청 (저장 전)
/// Charge to be inserted, built from the gateway descriptor
#[derive(Debug, Clone)]
pub struct NewPixCharge {
    pub user_id: Uuid,
    pub txid: String,
    pub amount: Decimal,
    pub qr_code_payload: String,
    pub qr_code_image: Option<String>,
}

/// 충전 요청 생성 응답
/// Create charge response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = CreateChargeResponse)]
pub struct CreateChargeResponse {
    pub charge: PixCharge,

    /// cob 만료 시간 (초)
    #[schema(example = 3600)]
    pub expires_in_secs: Option<u32>,

    pub message: String,
}

/// 현재 대기 중인 충전 요청 응답
/// Current pending charge (null when there is none)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = PendingChargeResponse)]
pub struct PendingChargeResponse {
    pub charge: Option<PixCharge>,
}

/// 충전 요청 조회 응답
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = ChargeResponse)]
pub struct ChargeResponse {
    pub charge: PixCharge,
}

/// 결제 확인 응답
/// Verify charge response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = VerifyChargeResponse)]
pub struct VerifyChargeResponse {
    #[schema(example = "PREMIUMa1b2c3d41735689600000")]
    pub txid: String,

    /// paid | pending
    pub status: PixChargeStatus,

    /// 게이트웨이 원본 상태 (대기 중일 때)
    /// Raw gateway status when still pending (e.g. "ATIVA")
    #[schema(example = "ATIVA")]
    pub gateway_status: Option<String>,

    /// 활성화된 구독 (결제 완료 시)
    pub subscription: Option<SubscriptionResponse>,

    pub message: String,
}
