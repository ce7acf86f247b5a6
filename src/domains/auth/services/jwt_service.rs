// src/domains/auth/services/jwt_service.rs
use crate::shared::errors::AuthError;
use crate::domains::auth::models::jwt::Claims;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

/// JWT 서비스
/// JWT Service. Tokens are issued by the hosted auth provider (HS256, shared secret);
/// this service only verifies them.
#[derive(Clone)]
pub struct JwtService {
    audience: String,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// JWT Service 생성
    /// Create JWT Service
    pub fn new(secret: &str, audience: &str) -> Self {
        Self {
            audience: audience.to_string(),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Access Token 검증 (서명, 만료, audience)
    /// Verify Access Token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.audience.as_str()]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!(error = %e, "Access token rejected");
            AuthError::InvalidToken
        })?;

        Ok(token_data.claims)
    }
}
