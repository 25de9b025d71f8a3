use anyhow::{Result, bail};
use hai_mcp_core::{
    HaiProvider, UNKNOWN_REGION,
    commands::{locate::locate_instances, power},
};

/// Uses the given region, or finds the one hosting the instance.
pub(crate) async fn resolve_region(
    provider: &dyn HaiProvider,
    instance_id: &str,
    region: Option<String>,
) -> Result<String> {
    if let Some(region) = region {
        return Ok(region);
    }
    let resolved = locate_instances(provider, &[instance_id.to_string()], None).await?;
    match resolved.get(instance_id).map(String::as_str) {
        Some(region) if region != UNKNOWN_REGION => Ok(region.to_string()),
        _ => bail!("instance {instance_id} was not found in any region"),
    }
}

pub async fn start(
    provider: &dyn HaiProvider,
    instance_id: &str,
    region: Option<String>,
) -> Result<()> {
    let region = resolve_region(provider, instance_id, region).await?;
    println!("{}", power::start_instance(provider, &region, instance_id).await?);
    Ok(())
}

pub async fn stop(
    provider: &dyn HaiProvider,
    instance_id: &str,
    region: Option<String>,
) -> Result<()> {
    let region = resolve_region(provider, instance_id, region).await?;
    println!("{}", power::stop_instance(provider, &region, instance_id).await?);
    Ok(())
}
