use anyhow::Result;
use hai_mcp_core::{
    HaiProvider,
    commands::{login::query_login_info, network::query_instance_network},
};

use crate::commands::{list::print_json, power::resolve_region};

pub async fn network(
    provider: &dyn HaiProvider,
    region: &str,
    instance_ids: &[String],
) -> Result<()> {
    print_json(&query_instance_network(provider, region, instance_ids).await?)
}

pub async fn login(
    provider: &dyn HaiProvider,
    instance_id: &str,
    region: Option<String>,
) -> Result<()> {
    let region = resolve_region(provider, instance_id, region).await?;
    print_json(&query_login_info(provider, &region, instance_id).await?)
}
