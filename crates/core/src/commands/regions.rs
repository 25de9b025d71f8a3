use std::collections::BTreeMap;

use serde::Serialize;

use crate::{cloud_provider::HaiProvider, error::Result, types::Region};

pub async fn list_regions(provider: &dyn HaiProvider) -> Result<Vec<Region>> {
    let response = provider.describe_regions(provider.default_region()).await?;
    Ok(response.region_set)
}

pub async fn get_all_region_codes(provider: &dyn HaiProvider) -> Result<Vec<String>> {
    Ok(list_regions(provider)
        .await?
        .into_iter()
        .map(|region| region.region)
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSummary {
    pub name: Option<String>,
    pub state: Option<String>,
    pub scholar_rocket_support: &'static str,
}

pub fn translate_scholar_rocket_support_state(state: Option<&str>) -> &'static str {
    match state {
        Some("NO_NEED_SUPPORT") => "not needed",
        Some("NOT_SUPPORT_YET") => "not supported yet",
        Some("ALREADY_SUPPORT") => "supported",
        _ => "unknown",
    }
}

/// Region code to display details, with the academic-acceleration
/// support state translated for presentation.
pub async fn region_summaries(
    provider: &dyn HaiProvider,
) -> Result<BTreeMap<String, RegionSummary>> {
    Ok(list_regions(provider)
        .await?
        .into_iter()
        .map(|region| {
            let summary = RegionSummary {
                scholar_rocket_support: translate_scholar_rocket_support_state(
                    region.scholar_rocket_support_state.as_deref(),
                ),
                name: region.region_name,
                state: region.region_state,
            };
            (region.region, summary)
        })
        .collect())
}
