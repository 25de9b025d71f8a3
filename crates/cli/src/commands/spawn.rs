use anyhow::Result;
use hai_mcp_core::{HaiProvider, commands::spawn::create_instance};

use crate::commands::list::print_json;

pub async fn create(
    provider: &dyn HaiProvider,
    region: Option<&str>,
    application_id: &str,
    bundle_type: &str,
    name: Option<&str>,
) -> Result<()> {
    let region = region.unwrap_or_else(|| provider.default_region());
    let response = create_instance(provider, region, application_id, bundle_type, name).await?;
    print_json(&response)?;
    println!("The instance may still be creating; check `hai-mcp login` once it is running.");
    Ok(())
}
