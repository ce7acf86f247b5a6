// PIX repositories
pub mod pix_charge_repository;

pub use pix_charge_repository::*;
