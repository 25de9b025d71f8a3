use anyhow::Result;
use hai_mcp_core::{
    HaiProvider,
    commands::{applications, list, locate, regions::region_summaries},
};
use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn regions(provider: &dyn HaiProvider) -> Result<()> {
    print_json(&region_summaries(provider).await?)
}

pub async fn instances(provider: &dyn HaiProvider, regions: &[String]) -> Result<()> {
    print_json(&list::list_instances(provider, regions).await?)
}

pub async fn locate(
    provider: &dyn HaiProvider,
    instance_ids: &[String],
    regions: &[String],
) -> Result<()> {
    print_json(&locate::locate_instances(provider, instance_ids, Some(regions)).await?)
}

pub async fn applications(provider: &dyn HaiProvider, region: Option<&str>) -> Result<()> {
    print_json(&applications::list_applications(provider, region).await?)
}
