/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) are the infrastructure interfaces the
/// governance core depends on. The CLI and the MCP server drive the
/// application layer directly.
pub mod outbound;
