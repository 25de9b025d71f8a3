pub mod cloud_provider;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod types;

pub use cloud_provider::{DEFAULT_REGION, HaiProvider};
pub use types::UNKNOWN_REGION;
