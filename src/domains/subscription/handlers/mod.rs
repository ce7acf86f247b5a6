// Subscription domain handlers
pub mod subscription_handler;

pub use subscription_handler::*;
