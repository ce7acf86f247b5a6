use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// PIX webhook 요청 본문
/// Inbound gateway notification: `{ "pix": [ ... ] }`
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(as = PixWebhookPayload)]
pub struct PixWebhookPayload {
    #[serde(default)]
    pub pix: Vec<PixWebhookEntry>,
}

/// Webhook 개별 결제 항목
/// One settled payment inside a webhook batch
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(as = PixWebhookEntry)]
pub struct PixWebhookEntry {
    /// 정적 PIX 결제는 txid가 없을 수 있음
    /// Absent for payments not tied to a cob
    #[schema(example = "PREMIUMa1b2c3d41735689600000")]
    pub txid: Option<String>,

    /// 결제 금액 ("10.00")
    #[schema(example = "10.00")]
    pub valor: String,

    pub chave: Option<String>,

    /// 결제 시각 (RFC 3339)
    #[schema(example = "2025-01-01T12:00:00.000Z")]
    pub horario: String,

    #[serde(rename = "infoPagador")]
    pub info_pagador: Option<String>,

    #[serde(rename = "endToEndId")]
    pub end_to_end_id: Option<String>,
}

/// 개별 항목 처리 결과
/// Outcome of one webhook entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEntryOutcome {
    /// 결제 확인 + 구독 활성화
    Activated,
    /// 이미 처리됨 (중복 전달)
    AlreadyPaid,
    /// 로컬에 없는 txid
    Unmatched,
    /// txid 누락
    MissingTxid,
    /// 저장소 에러 (로그만 남기고 계속 진행)
    Failed,
}

/// Webhook 배치 처리 결과
/// Per-outcome counters of a drained batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[schema(as = WebhookReport)]
pub struct WebhookReport {
    pub received: usize,
    pub activated: usize,
    pub already_paid: usize,
    pub unmatched: usize,
    pub missing_txid: usize,
    pub failed: usize,
}

impl WebhookReport {
    pub fn record(&mut self, outcome: WebhookEntryOutcome) {
        self.received += 1;
        match outcome {
            WebhookEntryOutcome::Activated => self.activated += 1,
            WebhookEntryOutcome::AlreadyPaid => self.already_paid += 1,
            WebhookEntryOutcome::Unmatched => self.unmatched += 1,
            WebhookEntryOutcome::MissingTxid => self.missing_txid += 1,
            WebhookEntryOutcome::Failed => self.failed += 1,
        }
    }
}

/// Webhook 응답
/// Acknowledgement returned to the gateway
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = WebhookAckResponse)]
pub struct WebhookAckResponse {
    pub success: bool,
    pub report: WebhookReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_parses_gateway_shape() {
        let payload: PixWebhookPayload = serde_json::from_str(
            r#"{"pix":[{"endToEndId":"E0000","txid":"PREMIUMabc","valor":"10.00",
                "chave":"key","horario":"2025-01-01T12:00:00.000Z","infoPagador":"obrigado"},
               {"valor":"5.00","horario":"2025-01-01T12:01:00.000Z"}]}"#,
        )
        .unwrap();

        assert_eq!(payload.pix.len(), 2);
        assert_eq!(payload.pix[0].txid.as_deref(), Some("PREMIUMabc"));
        assert_eq!(payload.pix[0].info_pagador.as_deref(), Some("obrigado"));
        assert!(payload.pix[1].txid.is_none());
    }

    #[test]
    fn test_report_counts_outcomes() {
        let mut report = WebhookReport::default();
        report.record(WebhookEntryOutcome::Activated);
        report.record(WebhookEntryOutcome::Unmatched);
        report.record(WebhookEntryOutcome::AlreadyPaid);

        assert_eq!(report.received, 3);
        assert_eq!(report.activated, 1);
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.already_paid, 1);
        assert_eq!(report.failed, 0);
    }
}
