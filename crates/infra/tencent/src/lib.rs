mod api_error;
mod config;
mod provider;
mod signer;

pub use config::{API_VERSION, DEFAULT_ENDPOINT, TencentProviderConfig};
pub use provider::TencentProvider;
