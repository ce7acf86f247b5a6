// PIX domain services
pub mod charge_service;
pub mod webhook_verifier;
pub mod state;

pub use charge_service::*;
pub use webhook_verifier::*;
pub use state::*;
