/// Adapters layer
///
/// `inbound` drives the application layer (the MCP server); `outbound`
/// implements the ports: in-memory stores, clocks, the file system,
/// console progress and report formatters.
pub mod inbound;
pub mod outbound;
