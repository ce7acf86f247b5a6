// PIX domain models
pub mod pix_charge;
pub mod gateway;
pub mod webhook;

pub use pix_charge::*;
pub use gateway::*;
pub use webhook::*;
