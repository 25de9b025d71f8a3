use async_trait::async_trait;
use chrono::Utc;
use hai_mcp_core::{
    cloud_provider::{HaiProvider, InstanceParams, InstanceSetParams, RunInstancesParams},
    credentials::Credentials,
    error::{ConfigurationError, ProviderError, Result},
    types::{
        DescribeApplicationsResponse, DescribeInstancesResponse, DescribeRegionsResponse,
        InstanceNetworkStatusResponse, OperationResponse, RunInstancesResponse,
        ServiceLoginSettingsResponse,
    },
};
use reqwest::{
    Client, Url,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::debug;

use crate::{
    api_error::{decode_response, map_request_error},
    config::{API_VERSION, SERVICE, TencentProviderConfig},
    signer,
};

pub struct TencentProvider {
    http_client: Client,
    endpoint: Url,
    host: String,
    credentials: Credentials,
    default_region: String,
}

impl TencentProvider {
    pub fn new(config: &TencentProviderConfig) -> Result<Self> {
        let endpoint =
            Url::parse(config.endpoint()).map_err(|error| ConfigurationError::InvalidValue {
                field: "endpoint".to_string(),
                reason: error.to_string(),
            })?;
        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(ConfigurationError::InvalidValue {
                    field: "endpoint".to_string(),
                    reason: format!("{endpoint} has no host"),
                }
                .into());
            }
        };
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|error| ConfigurationError::InvalidValue {
                field: "http client".to_string(),
                reason: error.to_string(),
            })?;

        Ok(Self {
            http_client,
            endpoint,
            host,
            credentials: config.credentials.clone(),
            default_region: config.default_region().to_string(),
        })
    }

    async fn call<P, R>(&self, action: &str, region: &str, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let body = serde_json::to_string(payload)?;
        let signed_at = Utc::now();
        let authorization =
            signer::authorization(&self.credentials, SERVICE, &self.host, &body, signed_at)
                .map_err(|error| ProviderError::Transport {
                    action: action.to_string(),
                    reason: format!("request signing failed: {error}"),
                })?;

        debug!(action, region, "calling HAI API");
        let mut request = self
            .http_client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, signer::CONTENT_TYPE)
            .header("X-TC-Action", action)
            .header("X-TC-Timestamp", signed_at.timestamp().to_string())
            .header("X-TC-Version", API_VERSION)
            .header("X-TC-Region", region);
        if let Some(token) = &self.credentials.token {
            request = request.header("X-TC-Token", token);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|error| map_request_error(action, error))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|error| map_request_error(action, error))?;
        debug!(action, region, status, "HAI API responded");

        decode_response(action, status, &text)
    }
}

#[async_trait]
impl HaiProvider for TencentProvider {
    async fn describe_regions(&self, region: &str) -> Result<DescribeRegionsResponse> {
        self.call("DescribeRegions", region, &json!({})).await
    }

    async fn describe_instances(&self, region: &str) -> Result<DescribeInstancesResponse> {
        self.call("DescribeInstances", region, &json!({})).await
    }

    async fn describe_applications(&self, region: &str) -> Result<DescribeApplicationsResponse> {
        self.call("DescribeApplications", region, &json!({})).await
    }

    async fn run_instances(&self, params: &RunInstancesParams) -> Result<RunInstancesResponse> {
        self.call("RunInstances", params.region, params).await
    }

    async fn start_instance(&self, params: &InstanceParams) -> Result<OperationResponse> {
        self.call("StartInstance", params.region, params).await
    }

    async fn stop_instance(&self, params: &InstanceParams) -> Result<OperationResponse> {
        self.call("StopInstance", params.region, params).await
    }

    async fn terminate_instances(&self, params: &InstanceSetParams) -> Result<OperationResponse> {
        self.call("TerminateInstances", params.region, params).await
    }

    async fn describe_instance_network_status(
        &self,
        params: &InstanceSetParams,
    ) -> Result<InstanceNetworkStatusResponse> {
        self.call("DescribeInstanceNetworkStatus", params.region, params)
            .await
    }

    async fn describe_service_login_settings(
        &self,
        params: &InstanceParams,
    ) -> Result<ServiceLoginSettingsResponse> {
        self.call("DescribeServiceLoginSettings", params.region, params)
            .await
    }

    fn default_region(&self) -> &str {
        &self.default_region
    }
}
