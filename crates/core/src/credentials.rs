use std::{
    fmt,
    path::{Path, PathBuf},
};

use ini::Ini;
use tokio::fs::{create_dir_all, try_exists};
use tracing::debug;

use crate::error::{ConfigurationError, CredentialsError, Error, Result};

pub const SECRET_ID_VARIABLE: &str = "TENCENTCLOUD_SECRET_ID";
pub const SECRET_KEY_VARIABLE: &str = "TENCENTCLOUD_SECRET_KEY";
pub const TOKEN_VARIABLE: &str = "TENCENTCLOUD_SESSION_TOKEN";

const PROFILE_SECTION: &str = "default";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub secret_id: String,
    pub secret_key: String,
    pub token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Credential values gathered from one source, any of which may be absent.
#[derive(Debug, Default, Clone)]
pub struct PartialCredentials {
    pub secret_id: Option<String>,
    pub secret_key: Option<String>,
    pub token: Option<String>,
}

impl PartialCredentials {
    fn or(self, fallback: PartialCredentials) -> PartialCredentials {
        PartialCredentials {
            secret_id: non_empty(self.secret_id).or(non_empty(fallback.secret_id)),
            secret_key: non_empty(self.secret_key).or(non_empty(fallback.secret_key)),
            token: non_empty(self.token).or(non_empty(fallback.token)),
        }
    }

    fn complete(self) -> Result<Credentials> {
        let secret_id = non_empty(self.secret_id).ok_or(CredentialsError::MissingField {
            field: SECRET_ID_VARIABLE.to_string(),
        })?;
        let secret_key = non_empty(self.secret_key).ok_or(CredentialsError::MissingField {
            field: SECRET_KEY_VARIABLE.to_string(),
        })?;
        Ok(Credentials {
            secret_id,
            secret_key,
            token: non_empty(self.token),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

pub fn get_credentials_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(ConfigurationError::HomeDirectoryNotAvailable)?;
    Ok(home_dir.join(".hai-mcp").join("credentials"))
}

pub async fn save_credentials(path: &Path, credentials: &Credentials) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !try_exists(parent).await? {
            create_dir_all(parent).await?;
        }
    }

    let mut profile = Ini::new();
    let mut section = profile.with_section(Some(PROFILE_SECTION));
    section
        .set("secret_id", credentials.secret_id.as_str())
        .set("secret_key", credentials.secret_key.as_str());
    if let Some(token) = &credentials.token {
        section.set("token", token.as_str());
    }

    profile.write_to_file(path)?;
    Ok(())
}

pub async fn load_profile(path: &Path) -> Result<PartialCredentials> {
    if !try_exists(path).await? {
        return Ok(PartialCredentials::default());
    }

    let profile = Ini::load_from_file(path).map_err(|error| match error {
        ini::Error::Io(io_error) => Error::InputOutput(io_error),
        ini::Error::Parse(parse_error) => CredentialsError::InvalidFormat {
            reason: parse_error.to_string(),
        }
        .into(),
    })?;

    let section =
        profile
            .section(Some(PROFILE_SECTION))
            .ok_or(CredentialsError::InvalidFormat {
                reason: format!("missing [{PROFILE_SECTION}] section in credentials file"),
            })?;

    Ok(PartialCredentials {
        secret_id: section.get("secret_id").map(ToString::to_string),
        secret_key: section.get("secret_key").map(ToString::to_string),
        token: section.get("token").map(ToString::to_string),
    })
}

/// Explicit values win field by field; the profile file fills the gaps.
/// A missing secret id or key after both sources is fatal.
pub async fn resolve_credentials(
    explicit: PartialCredentials,
    profile_path: Option<&Path>,
) -> Result<Credentials> {
    let profile = match profile_path {
        Some(path) => {
            debug!(path = %path.display(), "reading credentials profile");
            load_profile(path).await?
        }
        None => PartialCredentials::default(),
    };
    explicit.or(profile).complete()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explicit(id: Option<&str>, key: Option<&str>) -> PartialCredentials {
        PartialCredentials {
            secret_id: id.map(ToString::to_string),
            secret_key: key.map(ToString::to_string),
            token: None,
        }
    }

    #[tokio::test]
    async fn missing_secrets_are_fatal() {
        let error = resolve_credentials(explicit(None, None), None)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Credentials(CredentialsError::MissingField { ref field }) if field == SECRET_ID_VARIABLE
        ));

        let error = resolve_credentials(explicit(Some("AKID"), Some("  ")), None)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Credentials(CredentialsError::MissingField { ref field }) if field == SECRET_KEY_VARIABLE
        ));
    }

    #[tokio::test]
    async fn explicit_values_take_precedence_over_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials");
        save_credentials(
            &path,
            &Credentials {
                secret_id: "profile-id".to_string(),
                secret_key: "profile-key".to_string(),
                token: Some("profile-token".to_string()),
            },
        )
        .await
        .unwrap();

        let credentials = resolve_credentials(explicit(Some("env-id"), None), Some(&path))
            .await
            .unwrap();
        assert_eq!(credentials.secret_id, "env-id");
        assert_eq!(credentials.secret_key, "profile-key");
        assert_eq!(credentials.token.as_deref(), Some("profile-token"));
    }

    #[tokio::test]
    async fn absent_profile_file_contributes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials");
        let credentials = resolve_credentials(explicit(Some("id"), Some("key")), Some(&path))
            .await
            .unwrap();
        assert_eq!(credentials.token, None);
    }

    #[tokio::test]
    async fn profile_without_default_section_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials");
        std::fs::write(&path, "[other]\nsecret_id = x\n").unwrap();
        let error = load_profile(&path).await.unwrap_err();
        assert!(matches!(
            error,
            Error::Credentials(CredentialsError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let credentials = Credentials {
            secret_id: "AKIDexample".to_string(),
            secret_key: "super-secret".to_string(),
            token: Some("session".to_string()),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("AKIDexample"));
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("session"));
    }
}
