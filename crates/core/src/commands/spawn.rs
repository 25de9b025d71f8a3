use tracing::info;

use crate::{
    cloud_provider::{HaiProvider, RunInstancesParams},
    error::Result,
    types::RunInstancesResponse,
};

/// Buys and creates an instance. Application and bundle identifiers are
/// validated by the provider, not here.
pub async fn create_instance(
    provider: &dyn HaiProvider,
    region: &str,
    application_id: &str,
    bundle_type: &str,
    instance_name: Option<&str>,
) -> Result<RunInstancesResponse> {
    let params = RunInstancesParams {
        region,
        application_id,
        bundle_type,
        instance_name,
    };
    let response = provider.run_instances(&params).await?;
    info!(
        region,
        instances = ?response.instance_id_set,
        "instance creation submitted"
    );
    Ok(response)
}
