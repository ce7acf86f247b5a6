use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// 현재 사용자 정보 응답
/// Identity extracted from the bearer token
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = UserResponse)]
pub struct UserResponse {
    pub user_id: Uuid,

    #[schema(example = "user@example.com")]
    pub email: Option<String>,
}
