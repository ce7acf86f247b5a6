// Wallet repositories
pub mod wallet_repository;

pub use wallet_repository::*;
