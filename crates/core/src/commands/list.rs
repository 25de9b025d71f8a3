use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    cloud_provider::HaiProvider, commands::regions::get_all_region_codes, error::Result,
    types::Instance,
};

pub async fn list_region_instances(
    provider: &dyn HaiProvider,
    region: &str,
) -> Result<Vec<Instance>> {
    let response = provider.describe_instances(region).await?;
    Ok(response.instance_set)
}

/// Instance inventories in region enumeration order. An empty filter means
/// every region the provider reports. Regions are queried one after another
/// and the first failing region fails the whole listing.
pub async fn list_instances_by_region(
    provider: &dyn HaiProvider,
    regions: &[String],
) -> Result<Vec<(String, Vec<Instance>)>> {
    let regions = if regions.is_empty() {
        get_all_region_codes(provider).await?
    } else {
        regions.to_vec()
    };

    let mut inventories = Vec::with_capacity(regions.len());
    for region in regions {
        let instances = list_region_instances(provider, &region).await?;
        debug!(%region, count = instances.len(), "listed region instances");
        inventories.push((region, instances));
    }
    Ok(inventories)
}

pub async fn list_instances(
    provider: &dyn HaiProvider,
    regions: &[String],
) -> Result<BTreeMap<String, Vec<Instance>>> {
    Ok(list_instances_by_region(provider, regions)
        .await?
        .into_iter()
        .collect())
}
