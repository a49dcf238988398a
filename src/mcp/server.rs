//! MCP server - JSON-RPC dispatch over a reader/writer pair
//!
//! Provides:
//! - Request routing for initialize, ping, tools/list and tools/call
//! - One task per request, responses funnelled to a single writer task
//! - Draining of in-flight calls when the input ends

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use serde_json::{Value, json};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::error::{McpError, Result};
use crate::tools::ToolRegistry;

use super::codec::NdJsonCodec;
use super::messages::{
    CallToolParams, JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse, Methods, RequestId, RpcError, ServerInfo,
    negotiate_protocol_version,
};

/// Capacity of the response channel feeding the writer task
const RESPONSE_CHANNEL_CAPACITY: usize = 256;

/// Tool server bound to one registry
#[derive(Debug)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
}

impl McpServer {
    /// Create a server owning `registry`
    pub fn new(registry: ToolRegistry) -> Self {
        Self::with_registry(Arc::new(registry))
    }

    /// Create a server sharing `registry`
    pub fn with_registry(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            info: ServerInfo::default(),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Handle one decoded frame. Returns `None` for notifications.
    pub async fn handle_message(&self, frame: Value) -> Option<JsonRpcResponse> {
        let id = frame
            .get("id")
            .cloned()
            .and_then(|id| serde_json::from_value::<RequestId>(id).ok());

        let request: JsonRpcRequest = match serde_json::from_value(frame) {
            Ok(request) => request,
            Err(e) => {
                warn!("Invalid request: {}", e);
                return Some(JsonRpcResponse::error(
                    id,
                    RpcError::invalid_request(format!("Invalid request: {}", e)),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                RpcError::invalid_request(format!("Unsupported jsonrpc version: {}", request.jsonrpc)),
            ));
        }

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }
        Some(self.handle_request(request).await)
    }

    /// Handle a request that carries an id
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling request: {}", request.method);
        let id = request.id;
        let outcome = match request.method.as_str() {
            Methods::INITIALIZE => Ok(self.initialize(&request.params)),
            Methods::PING => Ok(json!({})),
            Methods::TOOLS_LIST => Ok(json!({ "tools": self.registry.list_tools() })),
            Methods::TOOLS_CALL => self.call_tool(request.params).await,
            other => Err(RpcError::method_not_found(other)),
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        }
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            Methods::INITIALIZED => info!("Client initialized"),
            other => debug!("Ignoring notification: {}", other),
        }
    }

    fn initialize(&self, params: &Value) -> Value {
        let requested = params.get("protocolVersion").and_then(Value::as_str);
        let version = negotiate_protocol_version(requested);
        if let Some(client) = params.get("clientInfo") {
            tracing::info!(client = %client, protocol = version, "Client connected");
        }

        json!({
            "protocolVersion": version,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": self.info,
        })
    }

    async fn call_tool(&self, params: Value) -> std::result::Result<Value, RpcError> {
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| RpcError::invalid_params(format!("Invalid tools/call params: {}", e)))?;

        match self.registry.invoke(&params.name, params.arguments).await {
            Ok(result) => serde_json::to_value(result).map_err(|e| RpcError::internal_error(e.to_string())),
            Err(e) => {
                warn!("tools/call {} rejected: {}", params.name, e);
                Err(RpcError::from(&e))
            }
        }
    }

    /// Serve newline-delimited JSON-RPC until `reader` reaches EOF.
    ///
    /// Every frame is handled on its own task; responses are written in
    /// completion order. Calls still running at EOF are answered before
    /// this returns.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut frames = FramedRead::new(reader, NdJsonCodec::<Value>::new());
        let (tx, mut rx) = mpsc::channel::<JsonRpcResponse>(RESPONSE_CHANNEL_CAPACITY);

        let writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, NdJsonCodec::<Value>::new());
            while let Some(response) = rx.recv().await {
                sink.send(response).await?;
            }
            Ok::<(), McpError>(())
        });

        let mut in_flight = JoinSet::new();
        let mut read_error = None;

        while let Some(frame) = frames.next().await {
            match frame {
                Ok(Ok(value)) => {
                    let server = Arc::clone(&self);
                    let tx = tx.clone();
                    in_flight.spawn(async move {
                        if let Some(response) = server.handle_message(value).await {
                            if tx.send(response).await.is_err() {
                                warn!("Response dropped: writer closed");
                            }
                        }
                    });
                }
                Ok(Err(e)) => {
                    warn!("Unreadable frame: {}", e);
                    let response = JsonRpcResponse::error(None, RpcError::parse_error(format!("Parse error: {}", e)));
                    if tx.send(response).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to read from transport: {}", e);
                    read_error = Some(McpError::Io(e));
                    break;
                }
            }

            while let Some(joined) = in_flight.try_join_next() {
                if let Err(e) = joined {
                    error!("Request task failed: {}", e);
                }
            }
        }

        debug!("Input closed, draining {} in-flight requests", in_flight.len());
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                error!("Request task failed: {}", e);
            }
        }
        drop(tx);

        writer_task
            .await
            .map_err(|e| McpError::Transport(format!("Writer task failed: {}", e)))??;

        match read_error {
            Some(e) => Err(e),
            None => {
                info!("Transport closed");
                Ok(())
            }
        }
    }

    /// Serve on the process's stdin/stdout
    pub async fn serve_stdio(self: Arc<Self>) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{FieldType, ObjectSchema, ToolHandler, ToolResult};
    use futures::FutureExt;
    use serde_json::Map;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        let echo: ToolHandler =
            Arc::new(|args: Map<String, Value>| async move { ToolResult::json(&Value::Object(args)) }.boxed());
        registry.register(
            "get_volume",
            "Get a volume by ID",
            ObjectSchema::new().required("id", FieldType::Integer),
            echo,
        );
        registry
    }

    fn server() -> McpServer {
        McpServer::new(registry())
    }

    async fn call(server: &McpServer, frame: Value) -> JsonRpcResponse {
        server.handle_message(frame).await.unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test", "version": "1.0"}
            }}),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(result["serverInfo"]["name"], "hetzner-cloud");
    }

    #[tokio::test]
    async fn test_ping() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": "p", "method": "ping"})).await;
        assert_eq!(response.id, Some(RequestId::from("p")));
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools[0]["name"], "get_volume");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["id"]));
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "get_volume", "arguments": {"id": 5}}}),
        )
        .await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["text"], "{\n  \"id\": 5\n}");
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "list_widgets"}}),
        )
        .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "Tool list_widgets not found");
    }

    #[tokio::test]
    async fn test_tools_call_invalid_arguments() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {"name": "get_volume", "arguments": {}}}),
        )
        .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.data.unwrap()["errors"][0]["path"], "id");
    }

    #[tokio::test]
    async fn test_tools_call_missing_name() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {}}),
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 7, "method": "resources/list"})).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_invalid_request_keeps_id() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 8})).await;
        assert_eq!(response.id, Some(RequestId::Number(8)));
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version() {
        let response = call(&server(), json!({"jsonrpc": "1.0", "id": 9, "method": "ping"})).await;
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_serve_over_duplex() {
        let server = Arc::new(server());
        let (client, server_end) = tokio::io::duplex(4096);
        let (server_read, server_write) = tokio::io::split(server_end);
        let handle = tokio::spawn(server.serve(server_read, server_write));

        let (client_read, mut client_write) = tokio::io::split(client);
        client_write
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\nnot json\n")
            .await
            .unwrap();
        client_write.shutdown().await.unwrap();

        let mut lines = BufReader::new(client_read).lines();
        let mut responses = Vec::new();
        while let Some(line) = lines.next_line().await.unwrap() {
            responses.push(serde_json::from_str::<Value>(&line).unwrap());
        }
        handle.await.unwrap().unwrap();

        assert_eq!(responses.len(), 2);
        assert!(responses.iter().any(|r| r["id"] == 1 && r["result"] == json!({})));
        assert!(responses.iter().any(|r| r["id"].is_null() && r["error"]["code"] == -32700));
    }
}
