use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use crate::domains::pix::models::{
    ChargeDescriptor, CobCalendar, CobRequest, CobResponseRaw, CobStatusRaw, CobValue,
    RemoteChargeStatus, TokenResponse,
};
use crate::shared::config::PixGatewayConfig;
use crate::shared::errors::GatewayError;
use crate::shared::utils::TxidGenerator;

/// cob 생성/조회에 필요한 OAuth scope
pub const PIX_SCOPES: &str = "pix.cob pix.cob.read";

/// 애플리케이션 키 헤더
pub const APP_KEY_HEADER: &str = "X-Application-Key";

/// PIX 게이트웨이 추상화
/// Seam between the charge lifecycle and the bank API (swapped for a fake in tests)
#[async_trait]
pub trait PixGateway: Send + Sync {
    /// client credentials로 access token 발급
    async fn authenticate(&self) -> Result<String, GatewayError>;

    /// 새 cob 생성 (txid는 로컬에서 생성)
    async fn create_charge(
        &self,
        amount: Decimal,
        owner_reference: &str,
    ) -> Result<ChargeDescriptor, GatewayError>;

    /// cob 상태 조회
    async fn get_charge_status(&self, txid: &str) -> Result<RemoteChargeStatus, GatewayError>;
}

// 은행 PIX API 클라이언트
// Bank PIX API client
// 토큰 캐시 없음: 매 호출마다 새 토큰 발급
pub struct PixGatewayClient {
    http_client: reqwest::Client,
    config: PixGatewayConfig,
}

impl PixGatewayClient {
    // 클라이언트 생성
    // Create new gateway client from explicit configuration
    pub fn new(config: PixGatewayConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client, config })
    }

    fn cob_url(&self, txid: &str) -> String {
        format!("{}/pix/v2/cob/{}", self.config.base_url, txid)
    }

    // 응답 상태 확인 후 JSON 파싱
    // Check status, then decode body
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Http { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// 금액을 소수점 2자리 문자열로 변환 ("10" → "10.00")
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

#[async_trait]
impl PixGateway for PixGatewayClient {
    async fn authenticate(&self) -> Result<String, GatewayError> {
        let url = format!("{}/oauth/token", self.config.base_url);
        let credentials = STANDARD.encode(format!(
            "{}:{}",
            self.config.client_id, self.config.client_secret
        ));

        debug!(url = %url, "Requesting PIX gateway token");

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Basic {}", credentials))
            .form(&[("grant_type", "client_credentials"), ("scope", PIX_SCOPES)])
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        // 토큰 단계의 non-2xx는 Auth 에러로 구분
        match Self::read_json::<TokenResponse>(response).await {
            Ok(token) => Ok(token.access_token),
            Err(GatewayError::Http { status, body }) => {
                warn!(status, "PIX gateway token exchange rejected");
                Err(GatewayError::Auth { status, body })
            }
            Err(e) => Err(e),
        }
    }

    async fn create_charge(
        &self,
        amount: Decimal,
        owner_reference: &str,
    ) -> Result<ChargeDescriptor, GatewayError> {
        let token = self.authenticate().await?;
        let txid = TxidGenerator::next(owner_reference);

        let body = CobRequest {
            calendario: CobCalendar {
                expiracao: self.config.charge_expiration_secs,
            },
            valor: CobValue {
                original: format_amount(amount),
            },
            chave: self.config.pix_key.clone(),
            solicitacao_pagador: format!("Assinatura Premium - {}", owner_reference),
        };

        let response = self
            .http_client
            .put(self.cob_url(&txid))
            .bearer_auth(&token)
            .header(APP_KEY_HEADER, &self.config.app_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let raw: CobResponseRaw = Self::read_json(response).await?;
        info!(txid = %raw.txid, amount = %body.valor.original, "PIX charge created at gateway");

        Ok(raw.into())
    }

    async fn get_charge_status(&self, txid: &str) -> Result<RemoteChargeStatus, GatewayError> {
        let token = self.authenticate().await?;

        let response = self
            .http_client
            .get(self.cob_url(txid))
            .bearer_auth(&token)
            .header(APP_KEY_HEADER, &self.config.app_key)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let raw: CobStatusRaw = Self::read_json(response).await?;
        debug!(txid, status = %raw.status, "PIX charge status fetched");

        Ok(RemoteChargeStatus::parse(&raw.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_amount_two_decimals() {
        assert_eq!(format_amount(Decimal::from(10)), "10.00");
        assert_eq!(format_amount(Decimal::from_str("20.5").unwrap()), "20.50");
        assert_eq!(format_amount(Decimal::from_str("9.999").unwrap()), "10.00");
    }
}
