//! Stdio MCP server.
//!
//! Lines are read one at a time. `initialize`, `ping` and `tools/list` are
//! answered inline; each `tools/call` runs as its own task so a slow client
//! call never blocks the next request. A call's id stays in flight until
//! its response is queued. All responses go through a single writer task,
//! one line each.

use super::messages::*;
use crate::tools::ToolContext;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const RESPONSE_QUEUE: usize = 64;

#[derive(Clone)]
pub struct McpServer {
    tools: Arc<ToolContext>,
    name: String,
    version: String,
}

/// Work spawned for in-flight `tools/call` requests, keyed by request id.
/// Each task yields its key and the response to send.
struct InFlight {
    calls: JoinSet<(String, JsonRpcResponse)>,
    handles: HashMap<String, AbortHandle>,
}

impl McpServer {
    pub fn new(tools: ToolContext) -> Self {
        Self {
            tools: Arc::new(tools),
            name: "karen".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serve on the process's stdin and stdout.
    pub async fn serve_stdio(self, cancel: CancellationToken) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout, cancel).await
    }

    /// Serve until the reader hits EOF or `cancel` fires.
    ///
    /// On EOF, calls already in flight finish and are answered. On cancel
    /// they are aborted.
    pub async fn serve<R, W>(self, mut reader: R, writer: W, cancel: CancellationToken) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(RESPONSE_QUEUE);
        let writer_task = tokio::spawn(write_responses(writer, rx));

        info!(
            "MCP server ready ({} tools, profile {})",
            self.tools.catalog().tools().len(),
            self.tools.catalog().profile()
        );

        let mut buf = Vec::new();
        let mut in_flight = InFlight {
            calls: JoinSet::new(),
            handles: HashMap::new(),
        };

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Shutdown requested");
                    break;
                }
                Some(done) = in_flight.calls.join_next(), if !in_flight.calls.is_empty() => {
                    if let Ok((key, response)) = done {
                        in_flight.handles.remove(&key);
                        send(&tx, response).await;
                    }
                }
                read = reader.read_until(b'\n', &mut buf) => {
                    let n = read.context("Failed to read from input")?;
                    if !buf.is_empty() {
                        let line = std::mem::take(&mut buf);
                        self.handle_bytes(&line, &tx, &mut in_flight).await;
                    }
                    if n == 0 {
                        debug!("Input closed");
                        break;
                    }
                }
            }
        }

        if cancel.is_cancelled() {
            in_flight.calls.abort_all();
        }
        while let Some(done) = in_flight.calls.join_next().await {
            if let Ok((_, response)) = done {
                send(&tx, response).await;
            }
        }

        drop(tx);
        writer_task
            .await
            .context("Response writer panicked")?
            .context("Failed to write response")?;
        info!("MCP server stopped");
        Ok(())
    }

    /// Decode one raw line. Invalid UTF-8 is a parse error, not a transport failure.
    async fn handle_bytes(
        &self,
        line: &[u8],
        tx: &mpsc::Sender<JsonRpcResponse>,
        in_flight: &mut InFlight,
    ) {
        match std::str::from_utf8(line) {
            Ok(text) => self.handle_line(text, tx, in_flight).await,
            Err(e) => {
                warn!("Input line is not valid UTF-8: {}", e);
                let err = JsonRpcError::parse_error(format!("Parse error: invalid UTF-8: {}", e));
                send(tx, JsonRpcResponse::error(Value::Null, err)).await;
            }
        }
    }

    async fn handle_line(
        &self,
        line: &str,
        tx: &mpsc::Sender<JsonRpcResponse>,
        in_flight: &mut InFlight,
    ) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!("Unparseable message: {}", e);
                let err = JsonRpcError::parse_error(format!("Parse error: {}", e));
                send(tx, JsonRpcResponse::error(Value::Null, err)).await;
                return;
            }
        };

        if !value.is_object() {
            let err = JsonRpcError::invalid_request("Expected a single JSON-RPC object");
            send(tx, JsonRpcResponse::error(Value::Null, err)).await;
            return;
        }

        let msg: IncomingMessage = match serde_json::from_value(value) {
            Ok(m) => m,
            Err(e) => {
                let err = JsonRpcError::invalid_request(format!("Invalid request: {}", e));
                send(tx, JsonRpcResponse::error(Value::Null, err)).await;
                return;
            }
        };

        if msg.is_response() {
            debug!("Ignoring unsolicited response");
            return;
        }

        let method = match msg.method.as_deref() {
            Some(m) => m.to_string(),
            None => {
                let id = msg.id.unwrap_or(Value::Null);
                let err = JsonRpcError::invalid_request("Missing method");
                send(tx, JsonRpcResponse::error(id, err)).await;
                return;
            }
        };

        if msg.jsonrpc.as_deref() != Some(JSONRPC_VERSION) {
            debug!("Message without jsonrpc \"2.0\" marker: {}", method);
        }

        match msg.id {
            None => self.handle_notification(&method, msg.params, in_flight),
            Some(id) => self.handle_request(id, &method, msg.params, tx, in_flight).await,
        }
    }

    fn handle_notification(&self, method: &str, params: Value, in_flight: &mut InFlight) {
        match method {
            "notifications/initialized" => info!("Client initialized"),
            "notifications/cancelled" => match serde_json::from_value::<CancelledParams>(params) {
                Ok(p) => {
                    let key = request_key(&p.request_id);
                    if let Some(handle) = in_flight.handles.remove(&key) {
                        handle.abort();
                        info!(
                            "Cancelled request {} ({})",
                            key,
                            p.reason.as_deref().unwrap_or("no reason given")
                        );
                    } else {
                        debug!("Cancel for unknown or finished request {}", key);
                    }
                }
                Err(e) => warn!("Malformed cancel notification: {}", e),
            },
            other => debug!("Ignoring notification {}", other),
        }
    }

    async fn handle_request(
        &self,
        id: Value,
        method: &str,
        params: Value,
        tx: &mpsc::Sender<JsonRpcResponse>,
        in_flight: &mut InFlight,
    ) {
        let response = match method {
            "initialize" => {
                let params: InitializeParams = serde_json::from_value(params).unwrap_or_default();
                let version = params.negotiated_version();
                match params.client_info.as_ref().and_then(client_label) {
                    Some(client) => info!("Initialize from {} (protocol {})", client, version),
                    None => info!("Initialize (protocol {})", version),
                }
                JsonRpcResponse::success(id, initialize_result(version, &self.name, &self.version))
            }
            "ping" => JsonRpcResponse::success(id, Value::Object(Default::default())),
            "tools/list" => {
                JsonRpcResponse::success(id, list_tools_result(&self.tools.definitions()))
            }
            "tools/call" => match serde_json::from_value::<CallToolParams>(params) {
                Ok(_) if in_flight.handles.contains_key(&request_key(&id)) => {
                    warn!("Duplicate in-flight request id {}", id);
                    JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_request("Request id is already in flight"),
                    )
                }
                Ok(call) => {
                    self.spawn_call(id, call, in_flight);
                    return;
                }
                Err(e) => JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                ),
            },
            other => {
                debug!("Unknown method {}", other);
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(other))
            }
        };
        send(tx, response).await;
    }

    fn spawn_call(&self, id: Value, call: CallToolParams, in_flight: &mut InFlight) {
        let key = request_key(&id);
        let tools = Arc::clone(&self.tools);
        let task_key = key.clone();

        let handle = in_flight.calls.spawn(async move {
            let response = match tools.invoke(&call.name, &call.arguments).await {
                Ok(text) => match serde_json::to_value(CallToolResult::text(text)) {
                    Ok(result) => JsonRpcResponse::success(id, result),
                    Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal(e.to_string())),
                },
                Err(e) => {
                    warn!("{}", e);
                    JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string()))
                }
            };
            (task_key, response)
        });
        in_flight.handles.insert(key, handle);
    }
}

/// `name version` from an MCP `clientInfo` object.
fn client_label(info: &Value) -> Option<String> {
    let name = info.get("name")?.as_str()?;
    Some(match info.get("version").and_then(Value::as_str) {
        Some(version) => format!("{} {}", name, version),
        None => name.to_string(),
    })
}

async fn send(tx: &mpsc::Sender<JsonRpcResponse>, response: JsonRpcResponse) {
    if tx.send(response).await.is_err() {
        warn!("Response dropped: writer has stopped");
    }
}

async fn write_responses<W>(mut writer: W, mut rx: mpsc::Receiver<JsonRpcResponse>) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_string(&response)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, MemeConfig};
    use crate::clients::{MemeCaptioner, TextGenerator};
    use crate::types::{CaptionResult, GenerationResult, Profile};
    use async_trait::async_trait;
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{DuplexStream, Lines, ReadHalf, WriteHalf};
    use tokio::task::JoinHandle;

    /// Answers immediately, unless the prompt mentions "slow" or "stall".
    struct ScriptedText;

    #[async_trait]
    impl TextGenerator for ScriptedText {
        async fn generate(&self, prompt: &str, _persona: &str) -> GenerationResult {
            if prompt.contains("stall") {
                std::future::pending::<()>().await;
            }
            if prompt.contains("slow") {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            GenerationResult::Text(format!("generated: {}", prompt))
        }
    }

    struct NoCaption;

    #[async_trait]
    impl MemeCaptioner for NoCaption {
        async fn caption(&self, _meme: &MemeConfig) -> CaptionResult {
            CaptionResult::Unavailable
        }
    }

    struct Client {
        reader: Lines<BufReader<ReadHalf<DuplexStream>>>,
        writer: WriteHalf<DuplexStream>,
        server: JoinHandle<Result<()>>,
    }

    impl Client {
        async fn send(&mut self, msg: Value) {
            self.send_raw(&msg.to_string()).await;
        }

        async fn send_raw(&mut self, line: &str) {
            self.send_bytes(line.as_bytes()).await;
        }

        async fn send_bytes(&mut self, line: &[u8]) {
            self.writer.write_all(line).await.unwrap();
            self.writer.write_all(b"\n").await.unwrap();
            self.writer.flush().await.unwrap();
        }

        async fn recv(&mut self) -> Value {
            let line = tokio::time::timeout(Duration::from_secs(5), self.reader.next_line())
                .await
                .expect("timed out waiting for response")
                .unwrap()
                .expect("server closed output");
            serde_json::from_str(&line).unwrap()
        }

        /// Close input; the server drains and exits. Returns any leftover lines.
        async fn finish(mut self) -> Vec<Value> {
            self.writer.shutdown().await.unwrap();
            let mut rest = Vec::new();
            while let Some(line) = self.reader.next_line().await.unwrap() {
                rest.push(serde_json::from_str(&line).unwrap());
            }
            self.server.await.unwrap().unwrap();
            rest
        }
    }

    fn start(profile: Profile) -> Client {
        start_with(profile, CancellationToken::new())
    }

    fn start_with(profile: Profile, cancel: CancellationToken) -> Client {
        let ctx = ToolContext::new(
            Catalog::for_profile(profile),
            Arc::new(ScriptedText),
            Arc::new(NoCaption),
        );
        let (client_io, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let server = tokio::spawn(McpServer::new(ctx).serve(
            BufReader::new(server_read),
            server_write,
            cancel,
        ));
        let (client_read, client_write) = tokio::io::split(client_io);
        Client {
            reader: BufReader::new(client_read).lines(),
            writer: client_write,
            server,
        }
    }

    #[tokio::test]
    async fn initialize_reports_tools_capability() {
        let mut client = start(Profile::Pm);
        client
            .send(json!({
                "jsonrpc": "2.0", "id": 1, "method": "initialize",
                "params": { "protocolVersion": "2024-11-05", "capabilities": {},
                            "clientInfo": { "name": "test", "version": "0" } }
            }))
            .await;
        let resp = client.recv().await;
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(resp["result"]["serverInfo"]["name"], "karen");
        assert!(resp["result"]["capabilities"]["tools"].is_object());

        client
            .send(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        assert!(client.finish().await.is_empty());
    }

    #[tokio::test]
    async fn tools_list_matches_profile() {
        let mut client = start(Profile::Customer);
        client
            .send(json!({"jsonrpc": "2.0", "id": "list", "method": "tools/list"}))
            .await;
        let resp = client.recv().await;
        assert_eq!(resp["id"], "list");
        let tools = resp["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 6);
        assert!(tools.iter().any(|t| t["name"] == "cite_fake_policy"));
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
        client.finish().await;
    }

    #[tokio::test]
    async fn tools_call_returns_text_content() {
        let mut client = start(Profile::Pm);
        client
            .send(json!({
                "jsonrpc": "2.0", "id": 7, "method": "tools/call",
                "params": { "name": "demand_feature_immediately",
                            "arguments": { "feature": "dark mode" } }
            }))
            .await;
        let resp = client.recv().await;
        assert_eq!(resp["id"], 7);
        assert_eq!(resp["result"]["isError"], false);
        let text = resp["result"]["content"][0]["text"].as_str().unwrap();
        assert_eq!(resp["result"]["content"][0]["type"], "text");
        assert!(text.contains("generated: "));
        assert!(text.contains("dark mode"));
        client.finish().await;
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_params() {
        let mut client = start(Profile::Pm);
        client
            .send(json!({
                "jsonrpc": "2.0", "id": 2, "method": "tools/call",
                "params": { "name": "demand_refund" }
            }))
            .await;
        let resp = client.recv().await;
        assert_eq!(resp["error"]["code"], ErrorCode::INVALID_PARAMS);
        assert!(resp["error"]["message"].as_str().unwrap().contains("demand_refund"));
        client.finish().await;
    }

    #[tokio::test]
    async fn protocol_errors() {
        let mut client = start(Profile::Pm);

        client.send_raw("{not json").await;
        let resp = client.recv().await;
        assert_eq!(resp["error"]["code"], ErrorCode::PARSE_ERROR);
        assert!(resp["id"].is_null());

        client.send_raw("[1, 2]").await;
        assert_eq!(client.recv().await["error"]["code"], ErrorCode::INVALID_REQUEST);

        client.send(json!({"jsonrpc": "2.0", "id": 3})).await;
        let resp = client.recv().await;
        assert_eq!(resp["error"]["code"], ErrorCode::INVALID_REQUEST);
        assert_eq!(resp["id"], 3);

        client
            .send(json!({"jsonrpc": "2.0", "id": 4, "method": "resources/list"}))
            .await;
        assert_eq!(client.recv().await["error"]["code"], ErrorCode::METHOD_NOT_FOUND);

        client
            .send(json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {}}))
            .await;
        assert_eq!(client.recv().await["error"]["code"], ErrorCode::INVALID_PARAMS);

        client.send_raw("").await;
        client
            .send(json!({"jsonrpc": "2.0", "method": "notifications/unknown"}))
            .await;
        client.send(json!({"jsonrpc": "2.0", "id": 6, "method": "ping"})).await;
        let resp = client.recv().await;
        assert_eq!(resp["id"], 6);
        assert_eq!(resp["result"], json!({}));

        assert!(client.finish().await.is_empty());
    }

    #[tokio::test]
    async fn slow_call_does_not_block_later_requests() {
        let mut client = start(Profile::Pm);
        client
            .send(json!({
                "jsonrpc": "2.0", "id": 1, "method": "tools/call",
                "params": { "name": "demand_feature_immediately",
                            "arguments": { "feature": "slow feature" } }
            }))
            .await;
        client.send(json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})).await;

        assert_eq!(client.recv().await["id"], 2);
        assert_eq!(client.recv().await["id"], 1);
        client.finish().await;
    }

    #[tokio::test]
    async fn calls_in_flight_at_eof_are_still_answered() {
        let mut client = start(Profile::Pm);
        client
            .send(json!({
                "jsonrpc": "2.0", "id": 9, "method": "tools/call",
                "params": { "name": "demand_feature_immediately",
                            "arguments": { "feature": "slow feature" } }
            }))
            .await;
        let rest = client.finish().await;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0]["id"], 9);
    }

    #[tokio::test]
    async fn cancelled_call_gets_no_response() {
        let mut client = start(Profile::Pm);
        client
            .send(json!({
                "jsonrpc": "2.0", "id": 1, "method": "tools/call",
                "params": { "name": "demand_feature_immediately",
                            "arguments": { "feature": "stall forever" } }
            }))
            .await;
        client
            .send(json!({
                "jsonrpc": "2.0", "method": "notifications/cancelled",
                "params": { "requestId": 1, "reason": "user gave up" }
            }))
            .await;
        client.send(json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})).await;

        assert_eq!(client.recv().await["id"], 2);
        assert!(client.finish().await.is_empty());
    }

    #[tokio::test]
    async fn cancellation_token_stops_the_server() {
        let cancel = CancellationToken::new();
        let mut client = start_with(Profile::Pm, cancel.clone());
        client
            .send(json!({
                "jsonrpc": "2.0", "id": 1, "method": "tools/call",
                "params": { "name": "demand_feature_immediately",
                            "arguments": { "feature": "stall forever" } }
            }))
            .await;
        client.send(json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})).await;
        assert_eq!(client.recv().await["id"], 2);

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), client.server)
            .await
            .expect("server did not stop")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn invalid_utf8_line_is_a_parse_error_and_session_continues() {
        let mut client = start(Profile::Pm);
        client.send_bytes(b"\xff\xfe garbage").await;
        let resp = client.recv().await;
        assert_eq!(resp["error"]["code"], ErrorCode::PARSE_ERROR);
        assert!(resp["id"].is_null());

        client.send(json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})).await;
        assert_eq!(client.recv().await["id"], 2);
        assert!(client.finish().await.is_empty());
    }

    #[tokio::test]
    async fn last_line_without_newline_is_handled() {
        let mut client = start(Profile::Pm);
        client
            .writer
            .write_all(br#"{"jsonrpc":"2.0","id":4,"method":"ping"}"#)
            .await
            .unwrap();
        let rest = client.finish().await;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0]["id"], 4);
    }

    #[tokio::test]
    async fn duplicate_in_flight_id_is_rejected() {
        let mut client = start(Profile::Pm);
        let stalled = json!({
            "jsonrpc": "2.0", "id": 1, "method": "tools/call",
            "params": { "name": "demand_feature_immediately",
                        "arguments": { "feature": "stall forever" } }
        });
        client.send(stalled.clone()).await;
        client.send(stalled).await;

        let resp = client.recv().await;
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["error"]["code"], ErrorCode::INVALID_REQUEST);

        // The original call is still tracked and can be cancelled.
        client
            .send(json!({
                "jsonrpc": "2.0", "method": "notifications/cancelled",
                "params": { "requestId": 1 }
            }))
            .await;
        client.send(json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})).await;
        assert_eq!(client.recv().await["id"], 2);
        assert!(client.finish().await.is_empty());
    }

    #[tokio::test]
    async fn id_can_be_reused_after_its_call_completes() {
        let mut client = start(Profile::Pm);
        let call = json!({
            "jsonrpc": "2.0", "id": 5, "method": "tools/call",
            "params": { "name": "demand_feature_immediately" }
        });
        client.send(call.clone()).await;
        assert_eq!(client.recv().await["result"]["isError"], false);

        client.send(call).await;
        let resp = client.recv().await;
        assert_eq!(resp["id"], 5);
        assert_eq!(resp["result"]["isError"], false);
        client.finish().await;
    }

    #[test]
    fn client_label_formats_name_and_version() {
        assert_eq!(
            client_label(&json!({"name": "inspector", "version": "0.9"})).as_deref(),
            Some("inspector 0.9")
        );
        assert_eq!(client_label(&json!({"name": "bare"})).as_deref(), Some("bare"));
        assert_eq!(client_label(&json!({"version": "1"})), None);
    }
}
