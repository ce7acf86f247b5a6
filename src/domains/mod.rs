// Domain modules
pub mod auth;
pub mod pix;
pub mod subscription;
pub mod wallet;
pub mod portfolio;
