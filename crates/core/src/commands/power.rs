use crate::{
    cloud_provider::{HaiProvider, InstanceParams},
    commands::raw_response,
    error::Result,
};

pub async fn start_instance(
    provider: &dyn HaiProvider,
    region: &str,
    instance_id: &str,
) -> Result<String> {
    let response = provider
        .start_instance(&InstanceParams {
            region,
            instance_id,
        })
        .await?;
    Ok(format!(
        "Start request submitted, the instance is powering on. Provider response: {}",
        raw_response(&response)
    ))
}

pub async fn stop_instance(
    provider: &dyn HaiProvider,
    region: &str,
    instance_id: &str,
) -> Result<String> {
    let response = provider
        .stop_instance(&InstanceParams {
            region,
            instance_id,
        })
        .await?;
    Ok(format!(
        "Stop request submitted, the instance is shutting down. Provider response: {}",
        raw_response(&response)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, testing::StaticProvider};

    #[tokio::test]
    async fn stop_status_embeds_raw_response() {
        let provider = StaticProvider::new();
        let status = stop_instance(&provider, "ap-shanghai", "hai-62rfhmf8")
            .await
            .unwrap();
        assert!(status.contains(r#""RequestId":"static-StopInstance""#));
        assert!(status.contains(r#""TaskId":"stop-hai-62rfhmf8""#));
    }

    #[tokio::test]
    async fn start_errors_propagate_unchanged() {
        let provider = StaticProvider::new().failing_region("ap-nanjing");
        let error = start_instance(&provider, "ap-nanjing", "hai-1")
            .await
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "InternalError: StartInstance unavailable in ap-nanjing (request id static-StartInstance)"
        );
        assert!(matches!(error, Error::Provider(_)));
    }
}
