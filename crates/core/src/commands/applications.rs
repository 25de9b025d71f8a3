use crate::{cloud_provider::HaiProvider, error::Result, types::Application};

/// Application templates offered in `region`, or in the provider's default
/// region when none is given.
pub async fn list_applications(
    provider: &dyn HaiProvider,
    region: Option<&str>,
) -> Result<Vec<Application>> {
    let region = region
        .filter(|region| !region.is_empty())
        .unwrap_or(provider.default_region());
    let response = provider.describe_applications(region).await?;
    Ok(response.application_set)
}
