use std::sync::Arc;

use hai_mcp_core::{
    HaiProvider,
    commands::{
        applications::list_applications, list::list_instances, locate::locate_instances,
        login::query_login_info, network::query_instance_network, power, regions::region_summaries,
        spawn::create_instance, terminate::remove_instances,
    },
    config::ServerConfig,
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::{
    protocol::{
        self, INVALID_REQUEST, McpError, PARSE_ERROR, RpcError, RpcRequest,
        negotiate_protocol_version,
    },
    resources::{self, INTRODUCTION, ResourceRoute},
    tools::{self, optional_str, required_list, required_str, string_list},
};

pub const SERVER_NAME: &str = "hai-mcp";

/// Agent-facing surface over one provider. Holds no mutable state; every
/// request is an independent sequence of provider calls.
pub struct McpServer {
    provider: Arc<dyn HaiProvider>,
    config: ServerConfig,
}

fn extract_params(params: Option<&Value>) -> Map<String, Value> {
    params
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn to_json_text<T: Serialize>(value: &T) -> Result<String, McpError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn initialize_result(params: &Map<String, Value>) -> Value {
    let requested = params.get("protocolVersion").and_then(Value::as_str);
    json!({
        "protocolVersion": negotiate_protocol_version(requested),
        "capabilities": {
            "tools": {"listChanged": false},
            "resources": {"subscribe": false, "listChanged": false}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "title": "HAI (Hyper Application Inventor) MCP Server",
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn rejection(id: Option<Value>, code: i32, error: serde_json::Error) -> Option<String> {
    let response = protocol::failure(
        id,
        RpcError {
            code,
            message: error.to_string(),
            data: None,
        },
    );
    serde_json::to_string(&response).ok()
}

impl McpServer {
    pub fn new(provider: Arc<dyn HaiProvider>, config: ServerConfig) -> Self {
        Self { provider, config }
    }

    /// `None` means the method is a notification and gets no reply.
    pub async fn handle_method(
        &self,
        method: &str,
        params: Option<&Value>,
    ) -> Option<Result<Value, McpError>> {
        if method.starts_with("notifications/") {
            return None;
        }

        let params = extract_params(params);
        let result = match method {
            "initialize" => Ok(initialize_result(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(tools::get_tool_schemas()),
            "tools/call" => self.call_tool(&params).await,
            "resources/list" => Ok(resources::resource_list()),
            "resources/templates/list" => Ok(resources::template_list()),
            "resources/read" => self.read_resource(&params).await,
            unknown => Err(McpError::MethodNotFound(unknown.to_string())),
        };
        Some(result)
    }

    async fn call_tool(&self, params: &Map<String, Value>) -> Result<Value, McpError> {
        let name = required_str(params, "name")?;
        let arguments = params
            .get("arguments")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let provider = self.provider.as_ref();
        debug!(tool = name, "calling tool");

        let text = match name {
            tools::CREATE_INSTANCE => to_json_text(
                &create_instance(
                    provider,
                    required_str(&arguments, "region")?,
                    required_str(&arguments, "application_id")?,
                    required_str(&arguments, "bundle_type")?,
                    optional_str(&arguments, "instance_name"),
                )
                .await?,
            )?,
            tools::START_INSTANCE => {
                power::start_instance(
                    provider,
                    required_str(&arguments, "region")?,
                    required_str(&arguments, "instance_id")?,
                )
                .await?
            }
            tools::STOP_INSTANCE => {
                power::stop_instance(
                    provider,
                    required_str(&arguments, "region")?,
                    required_str(&arguments, "instance_id")?,
                )
                .await?
            }
            tools::REMOVE_INSTANCE => {
                remove_instances(
                    provider,
                    required_str(&arguments, "region")?,
                    &required_list(&arguments, "instance_id_ls")?,
                )
                .await?
            }
            tools::QUERY_INSTANCE_NETWORK => to_json_text(
                &query_instance_network(
                    provider,
                    required_str(&arguments, "region")?,
                    &required_list(&arguments, "instance_id_ls")?,
                )
                .await?,
            )?,
            tools::FIND_INSTANCE_REGION => {
                let regions = string_list(&arguments, "regions")?;
                to_json_text(
                    &locate_instances(
                        provider,
                        &string_list(&arguments, "instance_ids")?,
                        Some(regions.as_slice()),
                    )
                    .await?,
                )?
            }
            tools::LIST_INSTANCES => to_json_text(
                &list_instances(provider, &string_list(&arguments, "regions")?).await?,
            )?,
            unknown => return Err(McpError::UnknownTool(unknown.to_string())),
        };

        Ok(json!({
            "content": [{"type": "text", "text": text}]
        }))
    }

    async fn read_resource(&self, params: &Map<String, Value>) -> Result<Value, McpError> {
        let uri = required_str(params, "uri")?;
        let route =
            resources::parse_uri(uri).ok_or_else(|| McpError::UnknownResource(uri.to_string()))?;
        let provider = self.provider.as_ref();
        debug!(uri, "reading resource");

        let (mime_type, text) = match route {
            ResourceRoute::Introduction => ("text/plain", INTRODUCTION.to_string()),
            ResourceRoute::InstanceTypes => {
                ("text/csv", self.config.bundle_catalog.as_str().to_string())
            }
            ResourceRoute::Regions => (
                "application/json",
                to_json_text(&region_summaries(provider).await?)?,
            ),
            ResourceRoute::Applications => (
                "application/json",
                to_json_text(&list_applications(provider, None).await?)?,
            ),
            ResourceRoute::Instances { regions } => (
                "application/json",
                to_json_text(&list_instances(provider, &regions).await?)?,
            ),
            ResourceRoute::InstanceRegion { instance_ids } => (
                "application/json",
                to_json_text(&locate_instances(provider, &instance_ids, None).await?)?,
            ),
            ResourceRoute::LoginMethod {
                region,
                instance_id,
            } => (
                "application/json",
                to_json_text(&query_login_info(provider, &region, &instance_id).await?)?,
            ),
        };

        Ok(json!({
            "contents": [{"uri": uri, "mimeType": mime_type, "text": text}]
        }))
    }

    /// Handles one line of input and returns the serialized reply, if any.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(error) => {
                warn!(%error, "unparseable JSON-RPC line");
                return rejection(None, PARSE_ERROR, error);
            }
        };
        let request_id = message.get("id").filter(|id| !id.is_null()).cloned();
        let request: RpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(error) => {
                warn!(%error, "invalid JSON-RPC request");
                return rejection(request_id, INVALID_REQUEST, error);
            }
        };
        debug!(method = %request.method, "received request");

        let result = self
            .handle_method(&request.method, request.params.as_ref())
            .await?;
        // Requests without an id are notifications.
        let id = request.id?;

        let serialized = match result {
            Ok(result) => serde_json::to_string(&protocol::success(Some(id), result)),
            Err(error) => {
                warn!(method = %request.method, %error, "request failed");
                serde_json::to_string(&protocol::failure(Some(id), error.into_rpc_error()))
            }
        };
        match serialized {
            Ok(serialized) => Some(serialized),
            Err(error) => {
                warn!(%error, "failed to serialize response");
                None
            }
        }
    }

    /// Reads newline-delimited JSON-RPC from `reader` until EOF and writes
    /// one reply line per request to `writer`.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(reply) = self.handle_line(&line).await {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        Ok(())
    }

    pub async fn serve_stdio(&self) -> std::io::Result<()> {
        info!("serving MCP over stdio");
        let result = self
            .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await;
        info!("stdin closed, MCP server stopping");
        result
    }
}
