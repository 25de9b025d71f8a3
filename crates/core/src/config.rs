use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigurationError, Result};

const DEFAULT_BUNDLE_CATALOG: &str = include_str!("../assets/bundle_type.csv");

/// Machine-bundle table served to agents as-is. Columns:
/// `bundle_type,bundle_name,description,gpu_performance,gpu_mem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleCatalog {
    text: String,
}

impl BundleCatalog {
    pub fn builtin() -> Self {
        Self {
            text: DEFAULT_BUNDLE_CATALOG.to_string(),
        }
    }

    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };
        debug!(path = %path.display(), "loading bundle catalogue");
        let text = tokio::fs::read_to_string(path).await.map_err(|error| {
            ConfigurationError::BundleCatalogUnreadable {
                path: path.display().to_string(),
                reason: error.to_string(),
            }
        })?;
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Everything the agent-facing server needs besides the provider itself.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bundle_catalog: BundleCatalog,
}

impl ServerConfig {
    pub async fn load(bundle_types_path: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            bundle_catalog: BundleCatalog::load(bundle_types_path.as_deref()).await?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bundle_catalog: BundleCatalog::builtin(),
        }
    }
}
