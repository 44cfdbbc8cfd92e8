use anyhow::Result;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use ynab_tools::{ToolManager, ToolStatus};

use crate::protocol::{
    Request, Response, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
};

/// Stateless dispatcher: every request is handled independently.
pub struct McpServer {
    tools: ToolManager,
    server_name: String,
    server_version: String,
}

impl McpServer {
    pub fn new(tools: ToolManager) -> Self {
        Self {
            tools,
            server_name: "ynab-mcp".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Handles one raw input line. Notifications produce no response.
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                debug!("unparseable request line: {e}");
                return Some(Response::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };
        let id = request.id.clone()?;
        Some(self.handle_request(&request, id).await)
    }

    async fn handle_request(&self, request: &Request, id: Value) -> Response {
        match request.method.as_str() {
            "initialize" => Response::success(
                id,
                json!({
                    "protocolVersion": "2024-11-05",
                    "serverInfo": {
                        "name": self.server_name,
                        "version": self.server_version,
                    },
                    "capabilities": { "tools": {} }
                }),
            ),
            "tools/list" => {
                let tools: Vec<Value> = self
                    .tools
                    .metadata()
                    .into_iter()
                    .map(|metadata| {
                        json!({
                            "name": metadata.id,
                            "description": metadata.description,
                            "inputSchema": metadata.input_schema,
                        })
                    })
                    .collect();
                Response::success(id, json!({ "tools": tools }))
            }
            "tools/call" => self.handle_tool_call(request, id).await,
            other => Response::failure(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        }
    }

    async fn handle_tool_call(&self, request: &Request, id: Value) -> Response {
        let Some(name) = request.params.get("name").and_then(Value::as_str) else {
            return Response::failure(id, INVALID_PARAMS, "Missing tool name");
        };
        let arguments = request
            .params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        debug!(tool = name, "dispatching tool call");
        match self.tools.execute_tool(name, arguments).await {
            Ok(result) => {
                let is_error = result.status != ToolStatus::Success;
                let text = match serde_json::to_string(&result.output) {
                    Ok(text) => text,
                    Err(e) => {
                        return Response::failure(
                            id,
                            INTERNAL_ERROR,
                            format!("Unserializable tool output: {e}"),
                        )
                    }
                };
                Response::success(
                    id,
                    json!({
                        "content": [{ "type": "text", "text": text }],
                        "isError": is_error,
                    }),
                )
            }
            // Contract violations and transport faults abort the call,
            // never degrade into an empty result.
            Err(e) => {
                error!(tool = name, "tool call faulted: {e:#}");
                Response::failure(id, INTERNAL_ERROR, format!("{e:#}"))
            }
        }
    }
}

/// Serves line-delimited JSON-RPC over stdio until EOF. Stdout carries
/// only protocol frames; logs go to stderr.
pub async fn run_stdio(server: McpServer) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    info!("serving on stdio");
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(response) = server.handle_line(&line).await {
            let mut frame = serde_json::to_vec(&response)?;
            frame.push(b'\n');
            stdout.write_all(&frame).await?;
            stdout.flush().await?;
        }
    }
    info!("stdin closed, shutting down");
    Ok(())
}
