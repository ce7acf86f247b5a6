// Portfolio domain models
pub mod transaction;
pub mod stats;

pub use transaction::*;
pub use stats::*;
