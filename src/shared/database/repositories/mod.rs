// All repositories module
pub mod pix;
pub mod subscription;
pub mod wallet;
pub mod portfolio;

// Re-export all repositories for convenience
pub use pix::*;
pub use subscription::*;
pub use wallet::*;
pub use portfolio::*;
