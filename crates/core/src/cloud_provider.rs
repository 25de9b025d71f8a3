use async_trait::async_trait;
use serde::Serialize;

use crate::{
    error::Result,
    types::{
        DescribeApplicationsResponse, DescribeInstancesResponse, DescribeRegionsResponse,
        InstanceNetworkStatusResponse, OperationResponse, RunInstancesResponse,
        ServiceLoginSettingsResponse,
    },
};

pub const DEFAULT_REGION: &str = "ap-shanghai";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunInstancesParams<'a> {
    #[serde(skip)]
    pub region: &'a str,
    pub application_id: &'a str,
    pub bundle_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<&'a str>,
}

/// Targets a single instance: start, stop and login-settings queries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceParams<'a> {
    #[serde(skip)]
    pub region: &'a str,
    pub instance_id: &'a str,
}

/// Targets several instances of one region: termination and network queries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceSetParams<'a> {
    #[serde(skip)]
    pub region: &'a str,
    pub instance_ids: &'a [String],
}

/// One method per HAI RPC. Every call names its target region; the
/// implementation holds nothing but immutable configuration.
#[async_trait]
pub trait HaiProvider: Send + Sync {
    async fn describe_regions(&self, region: &str) -> Result<DescribeRegionsResponse>;
    async fn describe_instances(&self, region: &str) -> Result<DescribeInstancesResponse>;
    async fn describe_applications(&self, region: &str) -> Result<DescribeApplicationsResponse>;
    async fn run_instances(&self, params: &RunInstancesParams) -> Result<RunInstancesResponse>;
    async fn start_instance(&self, params: &InstanceParams) -> Result<OperationResponse>;
    async fn stop_instance(&self, params: &InstanceParams) -> Result<OperationResponse>;
    async fn terminate_instances(&self, params: &InstanceSetParams) -> Result<OperationResponse>;
    async fn describe_instance_network_status(
        &self,
        params: &InstanceSetParams,
    ) -> Result<InstanceNetworkStatusResponse>;
    async fn describe_service_login_settings(
        &self,
        params: &InstanceParams,
    ) -> Result<ServiceLoginSettingsResponse>;

    /// Region used for calls that are not scoped to a caller-chosen region.
    fn default_region(&self) -> &str {
        DEFAULT_REGION
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn params_serialize_without_region() {
        let ids = vec!["hai-1".to_string(), "hai-2".to_string()];
        let params = InstanceSetParams {
            region: "ap-nanjing",
            instance_ids: &ids,
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"InstanceIds": ["hai-1", "hai-2"]})
        );

        let params = RunInstancesParams {
            region: "ap-shanghai",
            application_id: "app-abc",
            bundle_type: "XL",
            instance_name: None,
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"ApplicationId": "app-abc", "BundleType": "XL"})
        );
    }
}
