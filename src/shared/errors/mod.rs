// Shared errors
pub mod auth_error;
pub mod gateway_error;
pub mod store_error;
pub mod payment_error;
pub mod wallet_error;
pub mod portfolio_error;

pub use auth_error::*;
pub use gateway_error::*;
pub use store_error::*;
pub use payment_error::*;
pub use wallet_error::*;
pub use portfolio_error::*;
