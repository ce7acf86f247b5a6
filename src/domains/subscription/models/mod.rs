// Subscription domain models
pub mod subscription;

pub use subscription::*;
