use super::protocol::{
    CallToolParams, CallToolResult, JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND,
    PARSE_ERROR, PROTOCOL_VERSION, TOOL_ERROR,
};
use super::tools::{tool_definitions, GovernanceTools};
use crate::application::factories::GovernanceWorkspace;
use crate::shared::Result;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const SERVER_NAME: &str = "iso38500-governance";

/// MCP server speaking line-delimited JSON-RPC 2.0
///
/// Each input line holds one request; each response is written as one
/// line. Notifications (requests without an `id`) never get a response.
pub struct McpServer {
    tools: GovernanceTools,
}

impl McpServer {
    pub fn new(workspace: &GovernanceWorkspace) -> Self {
        Self {
            tools: GovernanceTools::new(workspace),
        }
    }

    /// Handles one raw input line and returns the serialized response, if any
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request)?,
            Err(e) => {
                tracing::warn!(error = %e, "malformed JSON-RPC message");
                JsonRpcResponse::failure(Value::Null, PARSE_ERROR, format!("Parse error: {}", e))
            }
        };

        match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize JSON-RPC response");
                None
            }
        }
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, id = ?request.id, "handling request");

        let Some(id) = request.id else {
            tracing::debug!(method = %request.method, "notification received");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result()),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => match self.call_tool(request.params) {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => {
                    let message = format!("{:#}", e);
                    tracing::warn!(error = %message, "tool call failed");
                    JsonRpcResponse::failure(id, TOOL_ERROR, message)
                }
            },
            other => JsonRpcResponse::failure(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };
        Some(response)
    }

    fn call_tool(&self, params: Option<Value>) -> Result<Value> {
        let params: CallToolParams = match params {
            Some(params) => serde_json::from_value(params)
                .map_err(|_| anyhow::anyhow!("Invalid parameters"))?,
            None => anyhow::bail!("Invalid parameters"),
        };
        let name = params
            .name
            .ok_or_else(|| anyhow::anyhow!("Tool name not specified"))?;
        let arguments = params
            .arguments
            .ok_or_else(|| anyhow::anyhow!("Tool arguments not specified"))?;

        let text = self.tools.call(&name, arguments)?;
        Ok(serde_json::to_value(CallToolResult::text(text))?)
    }

    /// Serves requests until the reader reaches end of input
    ///
    /// # Errors
    /// Returns an error if reading or writing the stream fails
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line) {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        tracing::info!("input closed, MCP server stopping");
        Ok(())
    }

    /// Serves requests on stdin/stdout
    pub async fn serve_stdio(&self) -> Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": { "listChanged": true } },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}
