// cryptotax_api: 암호화폐 세금 추적 백엔드 (PIX 프리미엄 결제)
// Crypto-tax tracker backend with PIX premium billing

pub mod domains;
pub mod shared;
pub mod routes;

pub use routes::create_router;
pub use shared::config::AppConfig;
pub use shared::services::AppState;
