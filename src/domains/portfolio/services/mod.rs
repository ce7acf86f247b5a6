// Portfolio domain services
pub mod transaction_service;
pub mod state;

pub use transaction_service::*;
pub use state::*;
