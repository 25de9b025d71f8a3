use std::time::Duration;

use hai_mcp_core::{DEFAULT_REGION, credentials::Credentials};

pub const DEFAULT_ENDPOINT: &str = "https://hai.tencentcloudapi.com";
pub const API_VERSION: &str = "2023-08-12";
pub const SERVICE: &str = "hai";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct TencentProviderConfig {
    pub credentials: Credentials,
    pub endpoint: Option<String>,
    pub default_region: Option<String>,
    pub timeout: Option<Duration>,
}

impl TencentProviderConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: None,
            default_region: None,
            timeout: None,
        }
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
    }

    pub(crate) fn default_region(&self) -> &str {
        self.default_region
            .as_deref()
            .filter(|region| !region.is_empty())
            .unwrap_or(DEFAULT_REGION)
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}
