// Subscription domain services
pub mod subscription_service;
pub mod expiry_scheduler;
pub mod state;

pub use subscription_service::*;
pub use expiry_scheduler::*;
pub use state::*;
