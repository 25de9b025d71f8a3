use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::{
    cloud_provider::HaiProvider, commands::list::list_instances_by_region, error::Result,
    types::UNKNOWN_REGION,
};

/// Maps every distinct requested instance id to the region that lists it,
/// or to [`UNKNOWN_REGION`] when none does.
///
/// `regions` restricts the scan; `None` or an empty slice scans every
/// region. The scan is exhaustive and sequential, and the first region to
/// list an id wins. A region query that fails aborts the whole resolution.
pub async fn locate_instances(
    provider: &dyn HaiProvider,
    instance_ids: &[String],
    regions: Option<&[String]>,
) -> Result<BTreeMap<String, String>> {
    if instance_ids.is_empty() {
        return Ok(BTreeMap::new());
    }

    let wanted: HashSet<&str> = instance_ids.iter().map(String::as_str).collect();
    let mut resolved = BTreeMap::new();

    let inventories = list_instances_by_region(provider, regions.unwrap_or_default()).await?;
    for (region, instances) in inventories {
        for instance in instances {
            if wanted.contains(instance.instance_id.as_str()) {
                resolved
                    .entry(instance.instance_id)
                    .or_insert_with(|| region.clone());
            }
        }
    }

    for instance_id in wanted {
        resolved
            .entry(instance_id.to_string())
            .or_insert_with(|| UNKNOWN_REGION.to_string());
    }

    debug!(
        requested = instance_ids.len(),
        resolved = resolved.len(),
        "located instances"
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, testing::StaticProvider};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn known_and_unknown_instances_resolve() {
        let provider = StaticProvider::new()
            .with_instances("ap-shanghai", &["hai-62rfhmf8"])
            .with_instances("ap-guangzhou", &["hai-other001"]);

        let requested = ids(&["hai-62rfhmf8", "hai-183g6z7u"]);
        let resolved = locate_instances(&provider, &requested, None).await.unwrap();

        assert_eq!(
            resolved,
            BTreeMap::from([
                ("hai-62rfhmf8".to_string(), "ap-shanghai".to_string()),
                ("hai-183g6z7u".to_string(), "unknown".to_string()),
            ])
        );
    }

    #[tokio::test]
    async fn empty_request_touches_nothing() {
        let provider = StaticProvider::new().with_instances("ap-shanghai", &["hai-1"]);
        let resolved = locate_instances(&provider, &[], None).await.unwrap();
        assert!(resolved.is_empty());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn duplicate_ids_collapse_to_one_entry() {
        let provider = StaticProvider::new().with_instances("ap-nanjing", &["hai-1"]);
        let requested = ids(&["hai-1", "hai-1", "hai-9", "hai-9"]);
        let resolved = locate_instances(&provider, &requested, None).await.unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved["hai-1"], "ap-nanjing");
        assert_eq!(resolved["hai-9"], UNKNOWN_REGION);
    }

    #[tokio::test]
    async fn first_region_in_enumeration_order_wins() {
        let provider = StaticProvider::new()
            .with_instances("ap-nanjing", &["hai-dup"])
            .with_instances("ap-beijing", &["hai-dup"]);

        let resolved = locate_instances(&provider, &ids(&["hai-dup"]), None)
            .await
            .unwrap();
        assert_eq!(resolved["hai-dup"], "ap-nanjing");
    }

    #[tokio::test]
    async fn region_restriction_limits_the_scan() {
        let provider = StaticProvider::new()
            .with_instances("ap-shanghai", &["hai-1"])
            .with_instances("ap-beijing", &["hai-2"]);

        let restriction = ids(&["ap-beijing"]);
        let requested = ids(&["hai-1", "hai-2"]);
        let resolved = locate_instances(&provider, &requested, Some(restriction.as_slice()))
            .await
            .unwrap();

        assert_eq!(resolved["hai-1"], UNKNOWN_REGION);
        assert_eq!(resolved["hai-2"], "ap-beijing");
        assert_eq!(provider.calls(), vec!["DescribeInstances ap-beijing"]);
    }

    #[tokio::test]
    async fn every_value_is_a_known_region_or_unknown() {
        let provider = StaticProvider::new()
            .with_instances("ap-shanghai", &["hai-a", "hai-b"])
            .with_instances("ap-chongqing", &["hai-c"]);
        let requested = ids(&["hai-c", "hai-a", "hai-z", "hai-a"]);

        let resolved = locate_instances(&provider, &requested, None).await.unwrap();

        let distinct: HashSet<&String> = requested.iter().collect();
        assert_eq!(resolved.len(), distinct.len());
        for value in resolved.values() {
            assert!(["ap-shanghai", "ap-chongqing", UNKNOWN_REGION].contains(&value.as_str()));
        }
    }

    #[tokio::test]
    async fn failing_region_fails_resolution() {
        let provider = StaticProvider::new()
            .with_instances("ap-shanghai", &["hai-1"])
            .with_instances("ap-beijing", &[])
            .failing_region("ap-beijing");

        let error = locate_instances(&provider, &ids(&["hai-1"]), None)
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Provider(_)));
    }
}
