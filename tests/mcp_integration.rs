//! Integration tests for MCP protocol handling.
//!
//! These tests verify the JSON-RPC 2.0 protocol surface: message parsing,
//! response serialisation, and the advertised tool list.

use desktop_cad_mcp::mcp::protocol::{
    parse_message, ErrorCode, IncomingMessage, JsonRpcError, JsonRpcResponse, RequestId,
    MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use desktop_cad_mcp::mcp::server::{all_tool_definitions, ToolCallResult};

// =============================================================================
// Protocol Parsing Tests
// =============================================================================

#[test]
fn test_parse_initialize_request() {
    let json = format!(
        r#"{{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {{
                "protocolVersion": "{MCP_PROTOCOL_VERSION}",
                "capabilities": {{}},
                "clientInfo": {{ "name": "test-client", "version": "1.0.0" }}
            }}
        }}"#
    );

    let IncomingMessage::Request(req) = parse_message(&json).unwrap() else {
        panic!("Expected Request");
    };
    assert_eq!(req.method, "initialize");
    assert_eq!(req.id, RequestId::Number(1));
}

#[test]
fn test_parse_tools_call_request() {
    let json = r#"{
        "jsonrpc": "2.0",
        "id": "call-1",
        "method": "tools/call",
        "params": {
            "name": "sketch_circle",
            "arguments": { "x": 0, "y": 0, "radius": 0.05 }
        }
    }"#;

    let IncomingMessage::Request(req) = parse_message(json).unwrap() else {
        panic!("Expected Request");
    };
    assert_eq!(req.method, "tools/call");
    assert_eq!(req.id, RequestId::String("call-1".to_string()));
    assert_eq!(req.params.unwrap()["name"], "sketch_circle");
}

#[test]
fn test_parse_initialized_notification() {
    let json = r#"{ "jsonrpc": "2.0", "method": "notifications/initialized" }"#;

    let IncomingMessage::Notification(notif) = parse_message(json).unwrap() else {
        panic!("Expected Notification");
    };
    assert_eq!(notif.method, "notifications/initialized");
}

#[test]
fn test_parse_rejects_garbage() {
    let err = parse_message("definitely not json").unwrap_err();
    assert_eq!(err.error.code, ErrorCode::ParseError.code());
}

#[test]
fn test_parse_rejects_missing_version() {
    let err = parse_message(r#"{ "id": 1, "method": "ping" }"#).unwrap_err();
    assert_eq!(err.error.code, ErrorCode::InvalidRequest.code());
}

#[test]
fn test_parse_is_idempotent() {
    let json = r#"{ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }"#;
    let a = parse_message(json).unwrap();
    let b = parse_message(json).unwrap();
    assert_eq!(a.method(), b.method());
}

// =============================================================================
// Response Serialisation Tests
// =============================================================================

#[test]
fn test_success_response_round_trips_id() {
    let resp = JsonRpcResponse::success(
        RequestId::String("abc".to_string()),
        serde_json::json!({ "tools": [] }),
    );
    let json = serde_json::to_string(&resp).unwrap();
    assert!(json.contains(r#""id":"abc""#));
    assert!(json.contains(r#""jsonrpc":"2.0""#));
}

#[test]
fn test_error_response_carries_method_name() {
    let err = JsonRpcError::method_not_found(RequestId::Number(9), "tools/teleport");
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("-32601"));
    assert!(json.contains("tools/teleport"));
}

#[test]
fn test_tool_error_result_sets_flag() {
    let result = ToolCallResult::error("unknown tool: carve_runes");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["isError"], true);
    assert_eq!(json["content"][0]["type"], "text");
}

#[test]
fn test_tool_success_result_omits_flag() {
    let result = ToolCallResult::text("ok");
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("isError").is_none());
}

// =============================================================================
// Tool Surface Tests
// =============================================================================

#[test]
fn test_server_name_is_stable() {
    assert_eq!(SERVER_NAME, "desktop-cad-mcp");
}

#[test]
fn test_tool_list_contains_local_and_proxied_tools() {
    let tools = all_tool_definitions();
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();

    // Local helpers
    assert!(names.contains(&"route_agent"));
    assert!(names.contains(&"parse_validation_intent"));
    assert!(names.contains(&"expand_recipe"));
    assert!(names.contains(&"run_recipe"));

    // One representative per proxied endpoint family
    assert!(names.contains(&"get_desktop_health"));
    assert!(names.contains(&"extrude"));
    assert!(names.contains(&"calculate_thermal"));
    assert!(names.contains(&"check_gdt"));
    assert!(names.contains(&"search_trades"));
}

#[test]
fn test_every_tool_schema_declares_its_required_fields() {
    for tool in all_tool_definitions() {
        let schema = &tool.input_schema;
        let properties = schema["properties"]
            .as_object()
            .unwrap_or_else(|| panic!("tool '{}' has no properties object", tool.name));

        if let Some(required) = schema["required"].as_array() {
            for field in required {
                let field = field.as_str().unwrap();
                assert!(
                    properties.contains_key(field),
                    "tool '{}' requires undeclared field '{field}'",
                    tool.name
                );
            }
        }
    }
}
