/// Inbound adapters drive the application from outside the process
pub mod mcp;
