//! MCP server for the desktop CAD bridge.
//!
//! Lifecycle follows the MCP specification: capability negotiation, an
//! `initialized` notification, then normal operation until EOF or a signal.
//!
//! # Architecture
//!
//! `tools/list` advertises two kinds of tools: local helpers (agent routing,
//! intent parsing, recipe handling) that run in-process, and the proxied
//! catalog, where every call becomes one HTTP request to the desktop server.
//! The server performs no interpretation of proxied results; the desktop
//! server's JSON comes back to the client verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::dispatch::{self, DesktopClient};
use crate::mcp::protocol::{
    parse_message, ErrorCode, IncomingMessage, JsonRpcError, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, RequestId, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::transport::StdioTransport;
use crate::{agent, intent, recipe};

/// Server state in the MCP lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Waiting for the initialize request.
    AwaitingInit,
    /// Initialize received, waiting for the initialized notification.
    Initialising,
    /// Ready for normal operation.
    Running,
    /// Shutdown in progress.
    ShuttingDown,
}

/// Server capabilities advertised during initialisation.
#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
    /// Tool-related capabilities.
    pub tools: ToolCapabilities,
}

impl Default for ServerCapabilities {
    fn default() -> Self {
        Self {
            tools: ToolCapabilities { list_changed: false },
        }
    }
}

/// Tool-specific capabilities.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCapabilities {
    /// Whether the tool list can change during the session. Ours is static.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Server information for the initialisation response.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Parameters for the initialize request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol version requested by the client.
    pub protocol_version: String,
    /// Client capabilities (unused; we require nothing of the client).
    #[serde(default)]
    pub capabilities: Value,
    /// Client information.
    #[serde(default)]
    pub client_info: Option<Value>,
}

/// A tool definition for the tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// Parameters for the tools/call request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call.
    pub name: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Value,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool call resulted in an error.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Creates a successful result carrying pretty-printed JSON.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        Self::text(pretty(value))
    }

    /// Creates an error text result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }
}

/// Pretty-prints a JSON value; `Value` serialisation cannot fail.
fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// The MCP server for the desktop CAD bridge.
pub struct McpServer {
    /// Current server state.
    state: ServerState,
    /// The transport layer.
    transport: StdioTransport,
    /// Negotiated protocol version (set after initialisation).
    protocol_version: Option<String>,
    /// HTTP client for the desktop automation server.
    client: DesktopClient,
}

impl McpServer {
    /// Creates a new MCP server in front of the given desktop client.
    #[must_use]
    pub fn new(client: DesktopClient) -> Self {
        Self {
            state: ServerState::AwaitingInit,
            transport: StdioTransport::new(),
            protocol_version: None,
            client,
        }
    }

    /// Returns the current server state.
    #[must_use]
    pub const fn state(&self) -> ServerState {
        self.state
    }

    /// Returns the negotiated protocol version, once initialised.
    #[must_use]
    pub fn negotiated_version(&self) -> Option<&str> {
        self.protocol_version.as_deref()
    }

    /// Runs the MCP server main loop with graceful shutdown handling.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.run_with_shutdown().await
    }

    /// Runs the main loop and handles shutdown.
    #[cfg(unix)]
    async fn run_with_shutdown(&mut self) -> std::io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).map_err(std::io::Error::other)?;
        let mut sigterm = signal(SignalKind::terminate()).map_err(std::io::Error::other)?;

        loop {
            tokio::select! {
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT, initiating graceful shutdown");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating graceful shutdown");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                line_result = self.transport.read_line() => {
                    if self.handle_transport_result(line_result).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Runs the main loop and handles shutdown.
    #[cfg(windows)]
    async fn run_with_shutdown(&mut self) -> std::io::Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    tracing::info!("Received Ctrl+C, initiating graceful shutdown");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                line_result = self.transport.read_line() => {
                    if self.handle_transport_result(line_result).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Handles the result from a transport read.
    ///
    /// Returns `true` if the server should shut down.
    async fn handle_transport_result(
        &mut self,
        line_result: std::io::Result<Option<String>>,
    ) -> std::io::Result<bool> {
        let Some(line) = line_result? else {
            // EOF: the client hung up.
            self.state = ServerState::ShuttingDown;
            return Ok(true);
        };

        if line.trim().is_empty() {
            return Ok(false);
        }

        self.handle_line(&line).await?;

        Ok(self.state == ServerState::ShuttingDown)
    }

    /// Handles a single line of input.
    async fn handle_line(&mut self, line: &str) -> std::io::Result<()> {
        match parse_message(line) {
            Ok(IncomingMessage::Request(req)) => self.handle_request(req).await,
            Ok(IncomingMessage::Notification(ref notif)) => {
                self.handle_notification(notif);
                Ok(())
            }
            Err(error) => self.transport.write_error(&error).await,
        }
    }

    /// Handles an incoming request.
    async fn handle_request(&mut self, req: JsonRpcRequest) -> std::io::Result<()> {
        let response = match req.method.as_str() {
            "initialize" => self.handle_initialize(&req),
            "tools/list" => self.handle_tools_list(&req),
            "tools/call" => self.handle_tools_call(&req).await,
            "ping" => Ok(JsonRpcResponse::success(req.id.clone(), json!({}))),
            _ => Err(JsonRpcError::method_not_found(req.id.clone(), &req.method)),
        };

        match response {
            Ok(resp) => self.transport.write_response(&resp).await,
            Err(error) => self.transport.write_error(&error).await,
        }
    }

    /// Handles an incoming notification.
    fn handle_notification(&mut self, notif: &JsonRpcNotification) {
        if notif.method == "notifications/initialized" && self.state == ServerState::Initialising {
            self.state = ServerState::Running;
            tracing::info!("Client initialised, server running");
        }
    }

    /// Handles the initialize request.
    fn handle_initialize(&mut self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        if self.state != ServerState::AwaitingInit {
            return Err(JsonRpcError::new(
                Some(req.id.clone()),
                ErrorCode::InvalidRequest,
                "Server already initialised",
            ));
        }

        let params: InitializeParams = req
            .params
            .as_ref()
            .map(|p| serde_json::from_value(p.clone()))
            .transpose()
            .map_err(|e| {
                JsonRpcError::invalid_params(req.id.clone(), format!("Invalid initialize params: {e}"))
            })?
            .ok_or_else(|| {
                JsonRpcError::invalid_params(req.id.clone(), "Missing initialize params")
            })?;

        tracing::debug!(
            client_version = params.protocol_version,
            "Negotiating protocol version"
        );

        self.protocol_version = Some(MCP_PROTOCOL_VERSION.to_string());
        self.state = ServerState::Initialising;

        Ok(JsonRpcResponse::success(
            req.id.clone(),
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": ServerCapabilities::default(),
                "serverInfo": ServerInfo::default(),
            }),
        ))
    }

    /// Handles the tools/list request.
    fn handle_tools_list(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        Ok(JsonRpcResponse::success(
            req.id.clone(),
            json!({ "tools": all_tool_definitions() }),
        ))
    }

    /// Handles the tools/call request.
    async fn handle_tools_call(
        &mut self,
        req: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let params: ToolCallParams = req
            .params
            .as_ref()
            .map(|p| serde_json::from_value(p.clone()))
            .transpose()
            .map_err(|e| {
                JsonRpcError::invalid_params(req.id.clone(), format!("Invalid tool call params: {e}"))
            })?
            .ok_or_else(|| {
                JsonRpcError::invalid_params(req.id.clone(), "Missing tool call params")
            })?;

        let result = match params.name.as_str() {
            // Local tools
            "route_agent" => Self::call_route_agent(&params.arguments),
            "parse_validation_intent" => Self::call_parse_intent(&params.arguments),
            "list_recipes" => Self::call_list_recipes(&params.arguments),
            "expand_recipe" => Self::call_expand_recipe(&params.arguments),
            "run_recipe" => self.call_run_recipe(&params.arguments).await,
            // Everything else is either in the proxy catalog or unknown;
            // the dispatcher decides and issues no I/O for unknown names.
            _ => self.call_proxied(&params.name, &params.arguments).await,
        };

        let result_value = serde_json::to_value(&result).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialise tool call result");
            JsonRpcError::internal_error(req.id.clone(), "failed to serialise result")
        })?;

        Ok(JsonRpcResponse::success(req.id.clone(), result_value))
    }

    /// Ensures the server is in the Running state.
    fn require_running(&self, id: &RequestId) -> Result<(), JsonRpcError> {
        if self.state != ServerState::Running {
            return Err(JsonRpcError::new(
                Some(id.clone()),
                ErrorCode::InvalidRequest,
                "Server not initialised",
            ));
        }
        Ok(())
    }

    // === Tool implementations ===

    /// Forwards a catalog tool call to the desktop server.
    async fn call_proxied(&self, name: &str, arguments: &Value) -> ToolCallResult {
        match self.client.dispatch(name, arguments).await {
            Ok(result) => ToolCallResult::json(&result),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Routes a chat message to an agent persona.
    fn call_route_agent(arguments: &Value) -> ToolCallResult {
        let Some(message) = arguments.get("message").and_then(Value::as_str) else {
            return ToolCallResult::error("route_agent requires a 'message' string");
        };

        let routed = agent::route(message);
        ToolCallResult::json(&json!({
            "agent": routed.agent,
            "score": routed.score,
            "system_prompt": routed.system_prompt,
        }))
    }

    /// Parses a validation intent out of a chat message.
    fn call_parse_intent(arguments: &Value) -> ToolCallResult {
        let Some(message) = arguments.get("message").and_then(Value::as_str) else {
            return ToolCallResult::error("parse_validation_intent requires a 'message' string");
        };

        match intent::parse(message) {
            Some(parsed) => {
                let suggested = parsed.intent_type.tool_name();
                ToolCallResult::json(&json!({
                    "intent": parsed,
                    "suggested_tool": suggested,
                }))
            }
            None => ToolCallResult::json(&json!({
                "intent": null,
                "note": "no validation intent detected",
            })),
        }
    }

    /// Lists the recipe catalog, optionally filtered by category.
    fn call_list_recipes(arguments: &Value) -> ToolCallResult {
        let category = arguments.get("category").and_then(Value::as_str);

        let recipes: Vec<Value> = recipe::catalog()
            .iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .map(|r| {
                json!({
                    "name": r.name,
                    "description": r.description,
                    "category": r.category,
                    "required_inputs": r.required_inputs,
                    "steps": r.steps.len(),
                })
            })
            .collect();

        ToolCallResult::json(&json!({ "recipes": recipes }))
    }

    /// Expands a recipe without running it.
    fn call_expand_recipe(arguments: &Value) -> ToolCallResult {
        let (name, inputs) = match recipe_args(arguments) {
            Ok(pair) => pair,
            Err(message) => return ToolCallResult::error(message),
        };

        match recipe::expand(name, &inputs) {
            Ok(steps) => ToolCallResult::json(&json!({ "recipe": name, "steps": steps })),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Expands a recipe and dispatches its steps sequentially.
    ///
    /// Each step is awaited before the next begins. The first failing step
    /// aborts the run; completed results are reported alongside the error.
    async fn call_run_recipe(&self, arguments: &Value) -> ToolCallResult {
        let (name, inputs) = match recipe_args(arguments) {
            Ok(pair) => pair,
            Err(message) => return ToolCallResult::error(message),
        };

        let steps = match recipe::expand(name, &inputs) {
            Ok(steps) => steps,
            Err(e) => return ToolCallResult::error(e.to_string()),
        };

        let mut completed = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            match self.client.dispatch(&step.tool, &step.params).await {
                Ok(result) => completed.push(json!({ "tool": step.tool, "result": result })),
                Err(e) => {
                    tracing::warn!(
                        recipe = name,
                        step = index,
                        tool = step.tool,
                        "Recipe run aborted"
                    );
                    return ToolCallResult::error(pretty(&json!({
                        "recipe": name,
                        "failed_step": { "index": index, "tool": step.tool },
                        "error": e.to_string(),
                        "completed": completed,
                    })));
                }
            }
        }

        ToolCallResult::json(&json!({
            "recipe": name,
            "steps_completed": completed.len(),
            "results": completed,
        }))
    }
}

/// Extracts the (recipe name, inputs object) pair shared by the recipe tools.
fn recipe_args(arguments: &Value) -> Result<(&str, Map<String, Value>), String> {
    let name = arguments
        .get("recipe")
        .and_then(Value::as_str)
        .ok_or("recipe tools require a 'recipe' string")?;

    let inputs = match arguments.get("inputs") {
        Some(Value::Object(map)) => map.clone(),
        None | Some(Value::Null) => Map::new(),
        Some(_) => return Err("'inputs' must be a JSON object".to_string()),
    };

    Ok((name, inputs))
}

/// Returns the definitions of the in-process tools.
fn local_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "route_agent".to_string(),
            description: "Pick the chat persona (trading, cad, sketch, work, general) whose \
                          keywords best match a message, and return its system prompt."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "The user's chat message"
                    }
                },
                "required": ["message"]
            }),
        },
        ToolDefinition {
            name: "parse_validation_intent".to_string(),
            description: "Best-effort guess of which drawing validation a message asks for, \
                          which file it names, and a confidence score. Returns a null intent \
                          when the message contains no validation request."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "The user's chat message"
                    }
                },
                "required": ["message"]
            }),
        },
        ToolDefinition {
            name: "list_recipes".to_string(),
            description: "List the available part-construction recipes.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Only list recipes in this category"
                    }
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "expand_recipe".to_string(),
            description: "Expand a recipe into its concrete tool calls without executing \
                          them. Use this to preview what run_recipe would do."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "recipe": {
                        "type": "string",
                        "description": "Recipe name, e.g. 'cylinder'"
                    },
                    "inputs": {
                        "type": "object",
                        "description": "Named dimensions, e.g. {\"diameter\": 0.1, \"height\": 0.05}"
                    }
                },
                "required": ["recipe", "inputs"]
            }),
        },
        ToolDefinition {
            name: "run_recipe".to_string(),
            description: "Expand a recipe and execute its steps on the desktop server, one \
                          at a time, stopping at the first failure."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "recipe": {
                        "type": "string",
                        "description": "Recipe name, e.g. 'cylinder'"
                    },
                    "inputs": {
                        "type": "object",
                        "description": "Named dimensions for the recipe's required inputs"
                    }
                },
                "required": ["recipe", "inputs"]
            }),
        },
    ]
}

/// Returns every advertised tool: local helpers first, then the proxy catalog.
#[must_use]
pub fn all_tool_definitions() -> Vec<ToolDefinition> {
    let mut tools = local_tool_definitions();
    tools.extend(dispatch::endpoints().map(|ep| ToolDefinition {
        name: ep.name.to_string(),
        description: ep.description.to_string(),
        input_schema: ep.input_schema(),
    }));
    tools
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn server() -> McpServer {
        let client = DesktopClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        McpServer::new(client)
    }

    fn init_request() -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: RequestId::Number(1),
            method: "initialize".to_string(),
            params: Some(json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": { "name": "test-client" }
            })),
        }
    }

    #[test]
    fn lifecycle_reaches_running() {
        let mut server = server();
        assert_eq!(server.state(), ServerState::AwaitingInit);

        server.handle_initialize(&init_request()).unwrap();
        assert_eq!(server.state(), ServerState::Initialising);
        assert_eq!(server.negotiated_version(), Some(MCP_PROTOCOL_VERSION));

        server.handle_notification(&JsonRpcNotification {
            jsonrpc: "2.0".to_string(),
            method: "notifications/initialized".to_string(),
            params: None,
        });
        assert_eq!(server.state(), ServerState::Running);
    }

    #[test]
    fn double_initialize_is_rejected() {
        let mut server = server();
        server.handle_initialize(&init_request()).unwrap();
        let err = server.handle_initialize(&init_request()).unwrap_err();
        assert_eq!(err.error.code, ErrorCode::InvalidRequest.code());
    }

    #[test]
    fn requests_before_running_are_rejected() {
        let server = server();
        let err = server.require_running(&RequestId::Number(5)).unwrap_err();
        assert_eq!(err.error.code, ErrorCode::InvalidRequest.code());
    }

    #[test]
    fn tool_definitions_valid() {
        let tools = all_tool_definitions();
        assert!(tools.len() > 40);

        for tool in &tools {
            assert!(!tool.name.is_empty());
            assert!(!tool.description.is_empty());
            assert_eq!(tool.input_schema["type"], "object");
        }

        // Local helpers and the proxy catalog must not collide.
        let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), tools.len());
    }

    #[test]
    fn route_agent_tool_returns_prompt() {
        let result = McpServer::call_route_agent(&json!({ "message": "extrude the part" }));
        assert!(!result.is_error);
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("\"cad\""));
        assert!(text.contains("system_prompt"));
    }

    #[test]
    fn route_agent_requires_message() {
        let result = McpServer::call_route_agent(&json!({}));
        assert!(result.is_error);
    }

    #[test]
    fn parse_intent_tool_reports_null_for_smalltalk() {
        let result = McpServer::call_parse_intent(&json!({ "message": "hello there" }));
        assert!(!result.is_error);
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("null"));
    }

    #[test]
    fn parse_intent_tool_suggests_a_tool() {
        let result = McpServer::call_parse_intent(&json!({
            "message": "check drawing ABC-123 for GD&T errors"
        }));
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("check_gdt"));
        assert!(text.contains("ABC-123"));
    }

    #[test]
    fn list_recipes_filters_by_category() {
        let all = McpServer::call_list_recipes(&json!({}));
        let ToolContent::Text { text: all_text } = &all.content[0];

        let machined = McpServer::call_list_recipes(&json!({ "category": "machined" }));
        let ToolContent::Text { text: machined_text } = &machined.content[0];

        assert!(all_text.contains("cylinder"));
        assert!(machined_text.contains("washer"));
        assert!(!machined_text.contains("\"cylinder\""));
    }

    #[test]
    fn expand_recipe_tool_previews_steps() {
        let result = McpServer::call_expand_recipe(&json!({
            "recipe": "cylinder",
            "inputs": { "diameter": 0.1, "height": 0.05 }
        }));
        assert!(!result.is_error);
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("sketch_circle"));
        assert!(text.contains("0.05"));
    }

    #[test]
    fn expand_recipe_tool_surfaces_missing_input() {
        let result = McpServer::call_expand_recipe(&json!({
            "recipe": "cylinder",
            "inputs": { "diameter": 0.1 }
        }));
        assert!(result.is_error);
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("height"));
    }

    #[tokio::test]
    async fn run_recipe_stops_at_first_failed_step() {
        // Nothing listens on the client's port: the first dispatch fails and
        // the run must abort with zero completed steps.
        let server = server();
        let result = server
            .call_run_recipe(&json!({
                "recipe": "cylinder",
                "inputs": { "diameter": 0.1, "height": 0.05 }
            }))
            .await;
        assert!(result.is_error);
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("\"index\": 0"));
        assert!(text.contains("new_part"));
    }

    #[tokio::test]
    async fn unknown_tool_call_is_an_error_result() {
        let server = server();
        let result = server.call_proxied("carve_runes", &json!({})).await;
        assert!(result.is_error);
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("unknown tool"));
    }
}
