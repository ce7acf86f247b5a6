/// PIX txid 생성기
/// PIX txid Generator
///
/// 형식: `PREMIUM` + 사용자 ID 앞 8자 + epoch 밀리초(13자리) + 순번(4자리)
/// 게이트웨이 규칙상 txid는 26~35자의 영숫자만 허용됨
///
/// 사용 방법:
/// ```ignore
/// let txid = TxidGenerator::next(&user_id.to_string());
/// ```

use std::sync::atomic::{AtomicU64, Ordering};
use chrono::Utc;

pub const TXID_PREFIX: &str = "PREMIUM";
pub const TXID_MIN_LEN: usize = 26;
pub const TXID_MAX_LEN: usize = 35;

const OWNER_SEGMENT_LEN: usize = 8;

/// 같은 밀리초 안의 충돌 방지용 순번
static TXID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// txid 생성기
/// AtomicU64 순번을 붙여서 같은 밀리초에 여러 번 호출해도 중복되지 않음
pub struct TxidGenerator;

impl TxidGenerator {
    /// 다음 txid 생성
    /// Generate next txid for the given owner reference
    pub fn next(owner_reference: &str) -> String {
        Self::build(owner_reference, Utc::now().timestamp_millis(), Self::next_sequence())
    }

    fn next_sequence() -> u64 {
        TXID_SEQUENCE.fetch_add(1, Ordering::SeqCst) % 10_000
    }

    fn build(owner_reference: &str, millis: i64, sequence: u64) -> String {
        // 영숫자만 남기고 8자로 자르거나 '0'으로 채움
        let mut owner: String = owner_reference
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(OWNER_SEGMENT_LEN)
            .collect();
        while owner.len() < OWNER_SEGMENT_LEN {
            owner.push('0');
        }

        format!("{}{}{:013}{:04}", TXID_PREFIX, owner, millis.max(0), sequence)
    }

    /// 게이트웨이 txid 규칙 검사
    /// Check the gateway txid rule (26-35 alphanumeric chars)
    pub fn is_valid(txid: &str) -> bool {
        (TXID_MIN_LEN..=TXID_MAX_LEN).contains(&txid.len())
            && txid.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_format() {
        let txid = TxidGenerator::build("a1b2c3d4-e5f6-7890-abcd-ef1234567890", 1735689600000, 7);
        assert_eq!(txid, "PREMIUMa1b2c3d417356896000000007");
        assert_eq!(txid.len(), 32);
        assert!(TxidGenerator::is_valid(&txid));
    }

    #[test]
    fn test_short_owner_is_padded() {
        let txid = TxidGenerator::build("ab-c", 1, 0);
        assert!(txid.starts_with("PREMIUMabc00000"));
        assert!(TxidGenerator::is_valid(&txid));
    }

    #[test]
    fn test_unique_within_same_millisecond() {
        let owner = "3f2c9a10-0000-0000-0000-000000000000";
        let ids: HashSet<String> = (0..1000).map(|_| TxidGenerator::next(owner)).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| TxidGenerator::is_valid(id)));
    }

    #[test]
    fn test_is_valid_rejects_bad_ids() {
        assert!(!TxidGenerator::is_valid("PREMIUM123"));
        assert!(!TxidGenerator::is_valid("PREMIUM-a1b2c3d4-1735689600000"));
        assert!(!TxidGenerator::is_valid(&"A".repeat(36)));
    }
}
