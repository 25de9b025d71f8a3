use serde_json::{Map, Value, json};

use crate::{protocol::McpError, resources::split_list};

pub const CREATE_INSTANCE: &str = "create_instance";
pub const START_INSTANCE: &str = "start_instance";
pub const STOP_INSTANCE: &str = "stop_instance";
pub const REMOVE_INSTANCE: &str = "remove_instance";
pub const QUERY_INSTANCE_NETWORK: &str = "query_instance_network";
pub const FIND_INSTANCE_REGION: &str = "find_instance_region";
pub const LIST_INSTANCES: &str = "list_instances";

/// Get tool schemas for the MCP `tools/list` reply
pub fn get_tool_schemas() -> Value {
    json!({
        "tools": [
            get_create_instance_schema(),
            get_start_instance_schema(),
            get_stop_instance_schema(),
            get_remove_instance_schema(),
            get_query_instance_network_schema(),
            get_find_instance_region_schema(),
            get_list_instances_schema()
        ]
    })
}

fn region_property() -> Value {
    json!({
        "type": "string",
        "description": "Region hosting the instance, e.g. ap-shanghai. If the user did not say, look it up with find_instance_region or resources://hai_instances/all"
    })
}

fn instance_id_list_property() -> Value {
    json!({
        "type": "array",
        "items": {"type": "string"},
        "description": "Instance ids, all in the given region. Must come from the user; do not guess"
    })
}

fn get_create_instance_schema() -> Value {
    json!({
        "name": CREATE_INSTANCE,
        "description": "Buy and create a HAI instance. Returns the new instance ids and the request id. The instance may still be creating when this returns; tell the user to wait, then read resources://login_method/{region}/{instance_id} and show the login method",
        "inputSchema": {
            "type": "object",
            "properties": {
                "region": {
                    "type": "string",
                    "description": "Region to create the instance in, ap-shanghai unless the user chose another"
                },
                "application_id": {
                    "type": "string",
                    "description": "Application template id from resources://application_templates. Any other value is rejected; ask the user to choose if they did not"
                },
                "bundle_type": {
                    "type": "string",
                    "description": "Machine bundle from the bundle_type column of resource://instance_type. Any other value is rejected; ask the user to choose if they did not"
                },
                "instance_name": {
                    "type": "string",
                    "description": "Optional display name for the instance"
                }
            },
            "required": ["region", "application_id", "bundle_type"]
        }
    })
}

fn get_start_instance_schema() -> Value {
    json!({
        "name": START_INSTANCE,
        "description": "Start (power on) an instance",
        "inputSchema": {
            "type": "object",
            "properties": {
                "region": region_property(),
                "instance_id": {
                    "type": "string",
                    "description": "Instance id. Must come from the user; do not run this without one"
                }
            },
            "required": ["region", "instance_id"]
        }
    })
}

fn get_stop_instance_schema() -> Value {
    json!({
        "name": STOP_INSTANCE,
        "description": "Stop (power off) an instance",
        "inputSchema": {
            "type": "object",
            "properties": {
                "region": region_property(),
                "instance_id": {
                    "type": "string",
                    "description": "Instance id. Must come from the user; do not run this without one"
                }
            },
            "required": ["region", "instance_id"]
        }
    })
}

fn get_remove_instance_schema() -> Value {
    json!({
        "name": REMOVE_INSTANCE,
        "description": "Terminate and return instances. This deletes the instances and their data: warn the user explicitly and remind them to back up first",
        "inputSchema": {
            "type": "object",
            "properties": {
                "region": region_property(),
                "instance_id_ls": instance_id_list_property()
            },
            "required": ["region", "instance_id_ls"]
        }
    })
}

fn get_query_instance_network_schema() -> Value {
    json!({
        "name": QUERY_INSTANCE_NETWORK,
        "description": "Network configuration and traffic usage of instances. Explain each returned field to the user",
        "inputSchema": {
            "type": "object",
            "properties": {
                "region": region_property(),
                "instance_id_ls": instance_id_list_property()
            },
            "required": ["region", "instance_id_ls"]
        }
    })
}

fn get_find_instance_region_schema() -> Value {
    json!({
        "name": FIND_INSTANCE_REGION,
        "description": "Find the region hosting each instance by scanning every region's inventory. Ids no region lists map to unknown",
        "inputSchema": {
            "type": "object",
            "properties": {
                "instance_ids": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Instance ids to locate"
                },
                "regions": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Optional region codes to restrict the scan to"
                }
            },
            "required": ["instance_ids"]
        }
    })
}

fn get_list_instances_schema() -> Value {
    json!({
        "name": LIST_INSTANCES,
        "description": "Instances (servers) keyed by region code",
        "inputSchema": {
            "type": "object",
            "properties": {
                "regions": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Region codes to list; omit or leave empty for every region"
                }
            }
        }
    })
}

pub fn required_str<'a>(arguments: &'a Map<String, Value>, key: &str) -> Result<&'a str, McpError> {
    optional_str(arguments, key)
        .ok_or_else(|| McpError::InvalidParams(format!("missing string argument `{key}`")))
}

pub fn optional_str<'a>(arguments: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Accepts a JSON array of strings or a single comma separated string.
pub fn string_list(arguments: &Map<String, Value>, key: &str) -> Result<Vec<String>, McpError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(joined)) => Ok(split_list(joined)),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(|item| item.trim().to_string())
                    .ok_or_else(|| McpError::InvalidParams(format!("`{key}` must contain strings")))
            })
            .filter(|item| !matches!(item, Ok(item) if item.is_empty()))
            .collect(),
        Some(_) => Err(McpError::InvalidParams(format!(
            "`{key}` must be a list of strings"
        ))),
    }
}

pub fn required_list(arguments: &Map<String, Value>, key: &str) -> Result<Vec<String>, McpError> {
    let items = string_list(arguments, key)?;
    if items.is_empty() {
        return Err(McpError::InvalidParams(format!(
            "argument `{key}` needs at least one value"
        )));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arguments(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn every_tool_has_a_name_and_object_schema() {
        let schemas = get_tool_schemas();
        let tools = schemas["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        for tool in tools {
            assert!(tool["name"].is_string());
            assert_eq!(tool["inputSchema"]["type"], "object");
        }
    }

    #[test]
    fn lists_accept_arrays_and_comma_strings() {
        let args = arguments(json!({
            "array": ["hai-1", " hai-2 ", ""],
            "joined": "hai-3,hai-4",
            "bad": [1, 2],
        }));
        assert_eq!(string_list(&args, "array").unwrap(), vec!["hai-1", "hai-2"]);
        assert_eq!(string_list(&args, "joined").unwrap(), vec!["hai-3", "hai-4"]);
        assert!(string_list(&args, "missing").unwrap().is_empty());
        assert!(matches!(
            string_list(&args, "bad"),
            Err(McpError::InvalidParams(_))
        ));
        assert!(required_list(&args, "missing").is_err());
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let args = arguments(json!({"region": "  ", "instance_id": "hai-1"}));
        assert!(required_str(&args, "region").is_err());
        assert_eq!(required_str(&args, "instance_id").unwrap(), "hai-1");
    }
}
