use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// PIX 게이트웨이 (은행 API) 요청/응답 모델
// Wire models of the bank PIX API (cob resource)

/// cob 생성 요청 본문
/// `PUT /pix/v2/cob/{txid}` body.
///
/// 은행 cob API 형식을 따름: 금액은 `valor.original`, 만료는 `calendario.expiracao` 아래에 중첩됨.
/// Deviates from the flat `{"valor": "20.00", "expiracao": 3600}` body in the service docs:
/// the bank's cob API nests the amount under `valor.original` and the expiry under
/// `calendario.expiracao`, and that nested shape is what goes on the wire.
#[derive(Debug, Serialize)]
pub struct CobRequest {
    pub calendario: CobCalendar,
    pub valor: CobValue,
    pub chave: String,
    #[serde(rename = "solicitacaoPagador")]
    pub solicitacao_pagador: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CobCalendar {
    /// 만료 시간 (초)
    pub expiracao: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CobValue {
    /// 금액 문자열, 소수점 2자리 ("10.00")
    pub original: String,
}

/// cob 생성 원시 응답 (내부용)
/// Raw cob response
#[derive(Debug, Deserialize)]
pub struct CobResponseRaw {
    pub txid: String,
    pub calendario: Option<CobCalendar>,
    pub valor: CobValue,
    pub chave: String,
    /// BR Code payload
    pub qrcode: String,
    #[serde(rename = "imagemQrcode", default)]
    pub imagem_qrcode: Option<String>,
}

/// cob 조회 원시 응답 (status만 사용)
#[derive(Debug, Deserialize)]
pub struct CobStatusRaw {
    pub status: String,
}

/// OAuth 토큰 응답
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// 게이트웨이가 돌려준 충전 요청 정보
/// Charge descriptor returned by the gateway after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChargeDescriptor {
    pub txid: String,
    /// 원래 금액 ("10.00")
    pub original_amount: String,
    pub pix_key: String,
    /// BR Code payload
    pub br_code: String,
    pub qr_code_image: Option<String>,
    pub expiration_secs: Option<u32>,
}

impl From<CobResponseRaw> for ChargeDescriptor {
    fn from(raw: CobResponseRaw) -> Self {
        Self {
            txid: raw.txid,
            original_amount: raw.valor.original,
            pix_key: raw.chave,
            br_code: raw.qrcode,
            qr_code_image: raw.imagem_qrcode.filter(|img| !img.is_empty()),
            expiration_secs: raw.calendario.map(|c| c.expiracao),
        }
    }
}

/// 게이트웨이 cob 상태
/// Charge status as reported by the gateway. Only `Concluida` means paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteChargeStatus {
    Ativa,
    Concluida,
    RemovidaPeloUsuarioRecebedor,
    RemovidaPeloPsp,
    Unknown(String),
}

impl RemoteChargeStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ATIVA" => RemoteChargeStatus::Ativa,
            "CONCLUIDA" => RemoteChargeStatus::Concluida,
            "REMOVIDA_PELO_USUARIO_RECEBEDOR" => RemoteChargeStatus::RemovidaPeloUsuarioRecebedor,
            "REMOVIDA_PELO_PSP" => RemoteChargeStatus::RemovidaPeloPsp,
            _ => RemoteChargeStatus::Unknown(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RemoteChargeStatus::Ativa => "ATIVA",
            RemoteChargeStatus::Concluida => "CONCLUIDA",
            RemoteChargeStatus::RemovidaPeloUsuarioRecebedor => "REMOVIDA_PELO_USUARIO_RECEBEDOR",
            RemoteChargeStatus::RemovidaPeloPsp => "REMOVIDA_PELO_PSP",
            RemoteChargeStatus::Unknown(raw) => raw,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RemoteChargeStatus::Concluida)
    }
}
