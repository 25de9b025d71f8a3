use anyhow::Result;
use hai_mcp_core::{HaiProvider, commands::terminate::remove_instances};

pub async fn terminate(
    provider: &dyn HaiProvider,
    region: &str,
    instance_ids: &[String],
) -> Result<()> {
    println!("{}", remove_instances(provider, region, instance_ids).await?);
    Ok(())
}
