use crate::{
    cloud_provider::{HaiProvider, InstanceParams},
    error::Result,
    types::ServiceLoginSettingsResponse,
};

/// Services running on the instance and the web URLs to reach them.
pub async fn query_login_info(
    provider: &dyn HaiProvider,
    region: &str,
    instance_id: &str,
) -> Result<ServiceLoginSettingsResponse> {
    provider
        .describe_service_login_settings(&InstanceParams {
            region,
            instance_id,
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticProvider;

    #[tokio::test]
    async fn login_settings_come_from_the_named_region() {
        let provider = StaticProvider::new();
        let settings = query_login_info(&provider, "ap-guangzhou", "hai-1")
            .await
            .unwrap();
        assert_eq!(
            settings.login_services[0].service_name.as_deref(),
            Some("JupyterLab")
        );
        assert_eq!(
            provider.calls(),
            vec!["DescribeServiceLoginSettings ap-guangzhou"]
        );
    }
}
