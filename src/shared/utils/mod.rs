/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - PIX txid 생성기
pub mod txid;

pub use txid::TxidGenerator;
