use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use crate::shared::errors::PaymentError;

type HmacSha256 = Hmac<Sha256>;

/// 서명 헤더 이름
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Webhook 서명 검증기
/// Verifies `X-Webhook-Signature: [sha256=]<hex>` = HMAC-SHA256(secret, raw body)
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// 본문 서명 계산 (hex)
    pub fn sign(&self, body: &[u8]) -> String {
        hex::encode(self.mac(body).finalize().into_bytes())
    }

    /// 서명 검증 (상수 시간 비교)
    pub fn verify(&self, body: &[u8], signature: Option<&str>) -> Result<(), PaymentError> {
        let signature = signature.ok_or(PaymentError::InvalidSignature)?.trim();
        let signature = signature.strip_prefix("sha256=").unwrap_or(signature);
        let provided = hex::decode(signature).map_err(|_| PaymentError::InvalidSignature)?;

        let expected = self.mac(body).finalize().into_bytes();
        if expected.as_slice().ct_eq(provided.as_slice()).into() {
            Ok(())
        } else {
            Err(PaymentError::InvalidSignature)
        }
    }

    fn mac(&self, body: &[u8]) -> HmacSha256 {
        // HMAC은 임의 길이 키를 허용하므로 실패하지 않음
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(body);
        mac
    }
}
