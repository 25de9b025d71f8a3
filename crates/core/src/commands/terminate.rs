use tracing::info;

use crate::{
    cloud_provider::{HaiProvider, InstanceSetParams},
    commands::raw_response,
    error::Result,
};

/// Terminates and returns the given instances. All ids must belong to
/// `region`; the data on them is gone once this succeeds.
pub async fn remove_instances(
    provider: &dyn HaiProvider,
    region: &str,
    instance_ids: &[String],
) -> Result<String> {
    let response = provider
        .terminate_instances(&InstanceSetParams {
            region,
            instance_ids,
        })
        .await?;
    info!(region, instances = ?instance_ids, "termination submitted");
    Ok(format!(
        "Instances removed. Provider response: {}",
        raw_response(&response)
    ))
}
