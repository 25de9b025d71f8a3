//! In-memory provider double for tests of code built on [`HaiProvider`].

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::{
    cloud_provider::{HaiProvider, InstanceParams, InstanceSetParams, RunInstancesParams},
    error::{ProviderError, Result},
    types::{
        Application, DescribeApplicationsResponse, DescribeInstancesResponse,
        DescribeRegionsResponse, Instance, InstanceNetworkStatusResponse, LoginService,
        NetworkStatus, OperationResponse, Region, RunInstancesResponse,
        ServiceLoginSettingsResponse,
    },
};

pub fn region(code: &str) -> Region {
    Region {
        region: code.to_string(),
        region_name: Some(format!("{code} name")),
        region_state: Some("AVAILABLE".to_string()),
        scholar_rocket_support_state: Some("NOT_SUPPORT_YET".to_string()),
        extra: Map::new(),
    }
}

pub fn instance(id: &str) -> Instance {
    Instance {
        instance_id: id.to_string(),
        instance_name: Some(format!("{id}-name")),
        instance_state: Some("RUNNING".to_string()),
        extra: Map::new(),
    }
}

pub fn application(id: &str) -> Application {
    Application {
        application_id: id.to_string(),
        application_name: Some(format!("{id} template")),
        description: None,
        extra: Map::new(),
    }
}

/// Serves fixed region inventories and records every call it receives as
/// `"<Action> <region>"`.
#[derive(Default)]
pub struct StaticProvider {
    regions: Vec<Region>,
    instances: HashMap<String, Vec<Instance>>,
    applications: Vec<Application>,
    failing_regions: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    /// Registers the region if needed and appends instances to its inventory.
    pub fn with_instances(mut self, region_code: &str, instance_ids: &[&str]) -> Self {
        if !self.regions.iter().any(|known| known.region == region_code) {
            self.regions.push(region(region_code));
        }
        self.instances
            .entry(region_code.to_string())
            .or_default()
            .extend(instance_ids.iter().map(|id| instance(id)));
        self
    }

    pub fn with_application(mut self, application_id: &str) -> Self {
        self.applications.push(application(application_id));
        self
    }

    /// Every call targeting this region fails with a provider error.
    pub fn failing_region(mut self, region_code: &str) -> Self {
        self.failing_regions.insert(region_code.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, action: &str, region: &str) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{action} {region}"));
        }
        if self.failing_regions.contains(region) {
            return Err(ProviderError::Api {
                code: "InternalError".to_string(),
                message: format!("{action} unavailable in {region}"),
                request_id: format!("static-{action}"),
            }
            .into());
        }
        Ok(())
    }
}

fn operation_response(action: &str, extra: Value) -> OperationResponse {
    OperationResponse {
        request_id: format!("static-{action}"),
        extra: extra.as_object().cloned().unwrap_or_default(),
    }
}

#[async_trait]
impl HaiProvider for StaticProvider {
    async fn describe_regions(&self, region: &str) -> Result<DescribeRegionsResponse> {
        self.record("DescribeRegions", region)?;
        Ok(DescribeRegionsResponse {
            region_set: self.regions.clone(),
            total_count: Some(self.regions.len() as u64),
            request_id: "static-DescribeRegions".to_string(),
        })
    }

    async fn describe_instances(&self, region: &str) -> Result<DescribeInstancesResponse> {
        self.record("DescribeInstances", region)?;
        let instance_set = self.instances.get(region).cloned().unwrap_or_default();
        Ok(DescribeInstancesResponse {
            total_count: Some(instance_set.len() as u64),
            instance_set,
            request_id: "static-DescribeInstances".to_string(),
        })
    }

    async fn describe_applications(&self, region: &str) -> Result<DescribeApplicationsResponse> {
        self.record("DescribeApplications", region)?;
        Ok(DescribeApplicationsResponse {
            application_set: self.applications.clone(),
            total_count: Some(self.applications.len() as u64),
            request_id: "static-DescribeApplications".to_string(),
        })
    }

    async fn run_instances(&self, params: &RunInstancesParams) -> Result<RunInstancesResponse> {
        self.record("RunInstances", params.region)?;
        Ok(RunInstancesResponse {
            instance_id_set: vec![format!("hai-{}", params.bundle_type.to_lowercase())],
            request_id: "static-RunInstances".to_string(),
        })
    }

    async fn start_instance(&self, params: &InstanceParams) -> Result<OperationResponse> {
        self.record("StartInstance", params.region)?;
        Ok(operation_response(
            "StartInstance",
            json!({"TaskId": format!("start-{}", params.instance_id)}),
        ))
    }

    async fn stop_instance(&self, params: &InstanceParams) -> Result<OperationResponse> {
        self.record("StopInstance", params.region)?;
        Ok(operation_response(
            "StopInstance",
            json!({"TaskId": format!("stop-{}", params.instance_id)}),
        ))
    }

    async fn terminate_instances(&self, params: &InstanceSetParams) -> Result<OperationResponse> {
        self.record("TerminateInstances", params.region)?;
        Ok(operation_response("TerminateInstances", json!({})))
    }

    async fn describe_instance_network_status(
        &self,
        params: &InstanceSetParams,
    ) -> Result<InstanceNetworkStatusResponse> {
        self.record("DescribeInstanceNetworkStatus", params.region)?;
        let network_status_set = params
            .instance_ids
            .iter()
            .map(|id| NetworkStatus {
                instance_id: Some(id.clone()),
                extra: json!({"Bandwidth": 10})
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect::<Vec<_>>();
        Ok(InstanceNetworkStatusResponse {
            total_count: Some(network_status_set.len() as u64),
            network_status_set,
            request_id: "static-DescribeInstanceNetworkStatus".to_string(),
        })
    }

    async fn describe_service_login_settings(
        &self,
        params: &InstanceParams,
    ) -> Result<ServiceLoginSettingsResponse> {
        self.record("DescribeServiceLoginSettings", params.region)?;
        Ok(ServiceLoginSettingsResponse {
            login_services: vec![LoginService {
                service_name: Some("JupyterLab".to_string()),
                url: Some(format!("https://{}.hai.example/lab", params.instance_id)),
                extra: Map::new(),
            }],
            request_id: "static-DescribeServiceLoginSettings".to_string(),
        })
    }
}
