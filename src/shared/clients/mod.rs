// 외부 API 클라이언트
// External API clients
pub mod pix_gateway;

pub use pix_gateway::*;
