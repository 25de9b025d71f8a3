use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("home directory not available")]
    HomeDirectoryNotAvailable,

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("bundle catalogue not readable at {path}: {reason}")]
    BundleCatalogUnreadable { path: String, reason: String },
}
