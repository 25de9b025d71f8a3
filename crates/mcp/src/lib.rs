//! MCP (Model Context Protocol) surface for the HAI relay: JSON-RPC 2.0 over
//! stdio, exposing the relay operations as tools and resources.

pub mod protocol;
pub mod resources;
mod server;
pub mod tools;

pub use server::{McpServer, SERVER_NAME};
