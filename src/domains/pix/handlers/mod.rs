// PIX domain handlers
pub mod charge_handler;
pub mod webhook_handler;

pub use charge_handler::*;
pub use webhook_handler::*;
