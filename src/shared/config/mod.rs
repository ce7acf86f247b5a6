// =====================================================
// AppConfig - 애플리케이션 설정 (환경 변수)
// =====================================================
// 역할: 환경 변수(.env 포함)에서 모든 설정을 한 번에 읽어 구조체로 보관
// 합성 루트(main)에서 생성해서 AppState로 넘김 (전역 싱글톤 없음)
// =====================================================

use std::str::FromStr;
use std::time::Duration;
use rust_decimal::Decimal;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3002";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_JWT_AUDIENCE: &str = "authenticated";
pub const DEFAULT_BB_BASE_URL: &str = "https://api.hm.bb.com.br";
pub const DEFAULT_CHARGE_EXPIRATION_SECS: u32 = 3600;
pub const DEFAULT_PREMIUM_PRICE: &str = "10.00";
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;

/// 설정 로딩 에러
/// Configuration loading errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// PIX 게이트웨이 설정
/// Bank PIX API settings (client credentials, application key, receiver key)
#[derive(Debug, Clone)]
pub struct PixGatewayConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// `X-Application-Key` 헤더 값
    pub app_key: String,
    /// 수취인 PIX 키 (cob의 `chave`)
    pub pix_key: String,
    /// cob 만료 시간 (초)
    pub charge_expiration_secs: u32,
}

/// 애플리케이션 설정
/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub cors_origin: String,
    /// 인증 서비스의 JWT 서명 키 (HS256)
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub pix: PixGatewayConfig,
    /// 프리미엄 가격 (BRL)
    pub premium_price: Decimal,
    /// Webhook HMAC 공유 비밀키
    pub webhook_secret: String,
    /// 구독 만료 스윕 주기
    pub subscription_sweep_interval: Duration,
}

impl AppConfig {
    /// 환경 변수에서 설정 읽기
    /// Load configuration from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 key → value 조회 함수로 설정 구성 (테스트용으로 분리)
    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &'static str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let charge_expiration_secs = parse_value(
            "PIX_CHARGE_EXPIRATION_SECS",
            &optional("PIX_CHARGE_EXPIRATION_SECS", &DEFAULT_CHARGE_EXPIRATION_SECS.to_string()),
        )?;
        let sweep_secs: u64 = parse_value(
            "SUBSCRIPTION_SWEEP_INTERVAL_SECS",
            &optional("SUBSCRIPTION_SWEEP_INTERVAL_SECS", &DEFAULT_SWEEP_INTERVAL_SECS.to_string()),
        )?;
        if sweep_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "SUBSCRIPTION_SWEEP_INTERVAL_SECS",
                value: "0".to_string(),
            });
        }

        let price_raw = optional("PREMIUM_PRICE", DEFAULT_PREMIUM_PRICE);
        let premium_price: Decimal = parse_value("PREMIUM_PRICE", &price_raw)?;
        if premium_price <= Decimal::ZERO || premium_price.normalize().scale() > 2 {
            return Err(ConfigError::Invalid { key: "PREMIUM_PRICE", value: price_raw });
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_addr: optional("BIND_ADDR", DEFAULT_BIND_ADDR),
            cors_origin: optional("CORS_ORIGIN", DEFAULT_CORS_ORIGIN),
            jwt_secret: required("SUPABASE_JWT_SECRET")?,
            jwt_audience: optional("JWT_AUDIENCE", DEFAULT_JWT_AUDIENCE),
            pix: PixGatewayConfig {
                base_url: optional("BB_BASE_URL", DEFAULT_BB_BASE_URL)
                    .trim_end_matches('/')
                    .to_string(),
                client_id: required("BB_CLIENT_ID")?,
                client_secret: required("BB_CLIENT_SECRET")?,
                app_key: required("BB_DEV_APP_KEY")?,
                pix_key: required("BB_PIX_KEY")?,
                charge_expiration_secs,
            },
            premium_price,
            webhook_secret: required("PIX_WEBHOOK_SECRET")?,
            subscription_sweep_interval: Duration::from_secs(sweep_secs),
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse::<T>().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
