use thiserror::Error;

/// PIX 게이트웨이 호출 에러
/// Errors raised while talking to the bank's PIX API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// OAuth 토큰 발급 실패 (client credentials)
    /// Token exchange rejected by the gateway
    #[error("PIX gateway authentication failed: {status} - {body}")]
    Auth { status: u16, body: String },

    /// cob 생성/조회 실패 (non-2xx, 원본 body 포함)
    /// Non-success response from a charge call, raw body preserved
    #[error("PIX gateway returned error: {status} - {body}")]
    Http { status: u16, body: String },

    /// 네트워크 에러 (연결 실패, 타임아웃)
    /// Request never produced a response
    #[error("Failed to reach PIX gateway: {0}")]
    Transport(String),

    /// 응답 JSON 파싱 실패
    /// Response body could not be decoded
    #[error("Failed to parse PIX gateway response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// 토큰 발급 단계 실패 여부
    pub fn is_auth(&self) -> bool {
        matches!(self, GatewayError::Auth { .. })
    }
}
