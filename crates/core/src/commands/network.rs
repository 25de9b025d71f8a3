use crate::{
    cloud_provider::{HaiProvider, InstanceSetParams},
    error::Result,
    types::InstanceNetworkStatusResponse,
};

pub async fn query_instance_network(
    provider: &dyn HaiProvider,
    region: &str,
    instance_ids: &[String],
) -> Result<InstanceNetworkStatusResponse> {
    provider
        .describe_instance_network_status(&InstanceSetParams {
            region,
            instance_ids,
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticProvider;

    #[tokio::test]
    async fn network_query_is_idempotent() {
        let provider = StaticProvider::new();
        let ids = vec!["hai-1".to_string()];
        let first = query_instance_network(&provider, "ap-shanghai", &ids)
            .await
            .unwrap();
        let second = query_instance_network(&provider, "ap-shanghai", &ids)
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.network_status_set[0].instance_id.as_deref(), Some("hai-1"));
    }
}
