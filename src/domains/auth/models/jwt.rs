use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims (호스팅 인증 서비스가 발급한 access token)
/// Claims of the access token issued by the hosted auth provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자 ID
    /// User ID
    pub sub: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// audience ("authenticated")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// 만료 시간 (Unix timestamp)
    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// 발급 시간 (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}
