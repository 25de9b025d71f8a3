use serde_json::{Value, json};

pub const INTRODUCTION_URI: &str = "resources://hai_introduction";
pub const REGIONS_URI: &str = "resources://hai_regions";
pub const APPLICATIONS_URI: &str = "resources://application_templates";
pub const INSTANCE_TYPES_URI: &str = "resource://instance_type";

const INSTANCES_PREFIX: &str = "resources://hai_instances/";
const INSTANCE_REGION_PREFIX: &str = "config://region/";
const LOGIN_METHOD_PREFIX: &str = "resources://login_method/";

pub const INTRODUCTION: &str = "Hyper Application Inventor (HAI) is a GPU/NPU application \
service for AI and scientific computing. It provides plug-and-play compute together with \
common environments, so teams can quickly deploy language models (LLM), AI image \
generation, data science and other high-performance applications, with the matching \
development tools and components already integrated.";

/// A `resources/read` target, with its path parameters extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRoute {
    Introduction,
    Regions,
    Applications,
    InstanceTypes,
    /// Empty means every region; only the literal `all` parses that way.
    Instances { regions: Vec<String> },
    InstanceRegion { instance_ids: Vec<String> },
    LoginMethod { region: String, instance_id: String },
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub fn parse_uri(uri: &str) -> Option<ResourceRoute> {
    match uri {
        INTRODUCTION_URI => return Some(ResourceRoute::Introduction),
        REGIONS_URI => return Some(ResourceRoute::Regions),
        APPLICATIONS_URI => return Some(ResourceRoute::Applications),
        INSTANCE_TYPES_URI => return Some(ResourceRoute::InstanceTypes),
        _ => {}
    }

    if let Some(regions) = uri.strip_prefix(INSTANCES_PREFIX) {
        if regions == "all" {
            return Some(ResourceRoute::Instances { regions: Vec::new() });
        }
        let regions = split_list(regions);
        if regions.is_empty() {
            return None;
        }
        return Some(ResourceRoute::Instances { regions });
    }

    if let Some(instance_ids) = uri.strip_prefix(INSTANCE_REGION_PREFIX) {
        return Some(ResourceRoute::InstanceRegion {
            instance_ids: split_list(instance_ids),
        });
    }

    let (region, instance_id) = uri.strip_prefix(LOGIN_METHOD_PREFIX)?.split_once('/')?;
    if region.is_empty() || instance_id.is_empty() || instance_id.contains('/') {
        return None;
    }
    Some(ResourceRoute::LoginMethod {
        region: region.to_string(),
        instance_id: instance_id.to_string(),
    })
}

pub fn resource_list() -> Value {
    json!({
        "resources": [
            {
                "uri": INTRODUCTION_URI,
                "name": "hai_introduction",
                "description": "What Tencent Cloud HAI is and what it is used for",
                "mimeType": "text/plain"
            },
            {
                "uri": REGIONS_URI,
                "name": "hai_regions",
                "description": "Every region HAI supports, keyed by region code, with display name, state and academic acceleration support",
                "mimeType": "application/json"
            },
            {
                "uri": APPLICATIONS_URI,
                "name": "application_templates",
                "description": "All HAI application templates. ApplicationId is the id to pass when creating an instance; Description explains what the template is for",
                "mimeType": "application/json"
            },
            {
                "uri": INSTANCE_TYPES_URI,
                "name": "instance_type",
                "description": "Machine bundles as CSV. bundle_type is the value create_instance accepts (e.g. XL); bundle_name is how application descriptions name the minimum tier; gpu_performance and gpu_mem describe the GPU",
                "mimeType": "text/csv"
            }
        ]
    })
}

pub fn template_list() -> Value {
    json!({
        "resourceTemplates": [
            {
                "uriTemplate": "resources://hai_instances/{regions}",
                "name": "hai_instances",
                "description": "Instances (servers) per region. regions is a comma separated list of region codes such as ap-shanghai,ap-nanjing, or all for every region",
                "mimeType": "application/json"
            },
            {
                "uriTemplate": "config://region/{instance_ids}",
                "name": "find_instance_region",
                "description": "Region hosting each instance. instance_ids is a comma separated list such as hai-xx1,hai-xx2; ids no region lists map to unknown",
                "mimeType": "application/json"
            },
            {
                "uriTemplate": "resources://login_method/{region}/{instance_id}",
                "name": "login_method",
                "description": "Services running on an instance and the web URLs to log in to them",
                "mimeType": "application/json"
            }
        ]
    })
}
