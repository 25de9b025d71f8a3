use hai_mcp_core::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2025-06-18";
/// Revisions this server can speak; a client asking for one of these gets
/// it echoed back.
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2024-11-05", "2025-03-26", PROTOCOL_VERSION];

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RpcSuccessResponse {
    pub jsonrpc: &'static str,
    pub result: Value,
    pub id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RpcErrorResponse {
    pub jsonrpc: &'static str,
    pub error: RpcError,
    pub id: Option<Value>,
}

#[derive(Debug, Error)]
pub enum McpError {
    #[error("unknown method: {0}")]
    MethodNotFound(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Operation(#[from] Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        match self {
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::UnknownTool(_) | McpError::UnknownResource(_) | McpError::InvalidParams(_) => {
                INVALID_PARAMS
            }
            McpError::Operation(_) | McpError::Json(_) => INTERNAL_ERROR,
        }
    }

    pub fn into_rpc_error(self) -> RpcError {
        RpcError {
            code: self.code(),
            message: self.to_string(),
            data: None,
        }
    }
}

/// The revision to answer `initialize` with: the client's own when
/// supported, the latest otherwise.
pub fn negotiate_protocol_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|requested| {
            SUPPORTED_PROTOCOL_VERSIONS
                .into_iter()
                .find(|supported| *supported == requested)
        })
        .unwrap_or(PROTOCOL_VERSION)
}

pub fn success(id: Option<Value>, result: Value) -> RpcSuccessResponse {
    RpcSuccessResponse {
        jsonrpc: JSONRPC_VERSION,
        result,
        id,
    }
}

pub fn failure(id: Option<Value>, error: RpcError) -> RpcErrorResponse {
    RpcErrorResponse {
        jsonrpc: JSONRPC_VERSION,
        error,
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_revisions_are_echoed() {
        assert_eq!(negotiate_protocol_version(Some("2024-11-05")), "2024-11-05");
        assert_eq!(negotiate_protocol_version(Some("2025-03-26")), "2025-03-26");
        assert_eq!(negotiate_protocol_version(Some("1999-01-01")), PROTOCOL_VERSION);
        assert_eq!(negotiate_protocol_version(None), PROTOCOL_VERSION);
    }
}
