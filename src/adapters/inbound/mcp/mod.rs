//! Model Context Protocol adapter
//!
//! Exposes the governance use cases as MCP tools over line-delimited
//! JSON-RPC on stdin/stdout.

mod protocol;
mod server;
mod tools;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolDefinition};
pub use server::McpServer;
pub use tools::{tool_definitions, GovernanceTools};
