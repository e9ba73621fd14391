//! Minimal MCP (Model Context Protocol) server over stdio, backed by a
//! Kroki diagram-rendering service.
//!
//! Reads line-delimited JSON-RPC 2.0 from stdin and writes responses to
//! stdout. Exposes two tools:
//! - `generate_diagram_url`: returns a shareable render URL for a diagram
//! - `download_diagram_image`: renders a diagram and saves it to a local file
//!
//! # Module layout
//!
//! - [`jsonrpc`] — JSON-RPC 2.0 wire types, response helpers, and stdout framing
//! - [`tools`] — tool registration, descriptors, and dispatch
//! - [`diagram`] — the rendering pipeline (encode, fetch, classify, extract, scale)
//! - [`config`] — server URL and timeout resolution
//! - [`http`] — the configured ureq agent

pub mod config;
pub mod diagram;
pub mod http;
pub mod jsonrpc;
pub mod tools;

use std::io::BufRead;

use serde_json::Value;

use config::ServiceConfig;
use diagram::client::HttpTransport;
use diagram::render::DiagramService;
use jsonrpc::{IncomingMessage, Response, send_response};
use tools::{handle_tools_call, handle_tools_list};

/// MCP protocol version.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name reported during initialization.
pub const SERVER_NAME: &str = "kroki-mcp";

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handle the `initialize` JSON-RPC request.
fn handle_initialize() -> Value {
    serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": VERSION
        }
    })
}

/// Run the MCP server loop. Reads JSON-RPC messages from stdin until the
/// stream is closed or an I/O error occurs, then returns normally so callers
/// can run destructors and exit cleanly.
pub fn run_mcp_server(config: ServiceConfig) {
    eprintln!(
        "[{SERVER_NAME}] Starting v{VERSION} (server: {})",
        config.server_url
    );

    let transport = HttpTransport::new(config.timeout);
    let service = DiagramService::new(config, transport);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("[{SERVER_NAME}] Error reading stdin: {e}");
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        log::debug!("<- {trimmed}");

        let msg: IncomingMessage = match serde_json::from_str(trimmed) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("parse error: {e}");
                send_response(&mut stdout, &Response::parse_error());
                continue;
            }
        };

        let Some(method) = msg.method.as_deref() else {
            // Not a request or notification we handle.
            log::debug!("ignoring message without method");
            continue;
        };

        // Notifications (no id) don't get responses.
        let Some(id) = msg.id else {
            log::debug!("notification: {method}");
            continue;
        };

        let response = match method {
            "initialize" => Response::success(id, handle_initialize()),
            "tools/list" => Response::success(id, handle_tools_list()),
            "tools/call" => Response::success(id, handle_tools_call(&service, msg.params)),
            _ => Response::method_not_found(id, method),
        };

        log::debug!(
            "-> {}",
            serde_json::to_string(&response).unwrap_or_else(|_| "<serialization error>".into())
        );

        send_response(&mut stdout, &response);
    }

    eprintln!("[{SERVER_NAME}] stdin closed, exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagram::client::{RawResponse, Transport};
    use diagram::error::DiagramError;

    /// Stub transport replaying one canned response.
    struct StubTransport {
        status: u16,
        content_type: Option<&'static str>,
        body: &'static str,
    }

    impl Transport for StubTransport {
        fn fetch(&self, _url: &str) -> Result<RawResponse, DiagramError> {
            Ok(RawResponse {
                status: self.status,
                content_type: self.content_type.map(str::to_string),
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    /// Stub transport that fails the test if any fetch is attempted.
    struct PanickingTransport;

    impl Transport for PanickingTransport {
        fn fetch(&self, url: &str) -> Result<RawResponse, DiagramError> {
            panic!("no network call expected, got fetch of {url}");
        }
    }

    fn offline_service() -> DiagramService<PanickingTransport> {
        DiagramService::new(ServiceConfig::default(), PanickingTransport)
    }

    const CLEAN_SVG: &str =
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100px" height="50px"></svg>"#;

    fn svg_service() -> DiagramService<StubTransport> {
        DiagramService::new(
            ServiceConfig::default(),
            StubTransport {
                status: 200,
                content_type: Some("image/svg+xml"),
                body: CLEAN_SVG,
            },
        )
    }

    #[test]
    fn test_handle_initialize() {
        let result = handle_initialize();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert!(result["capabilities"]["tools"].is_object());
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    }

    #[test]
    fn test_handle_tools_list() {
        let result = handle_tools_list();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        let names: Vec<_> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert!(names.contains(&"generate_diagram_url"));
        assert!(names.contains(&"download_diagram_image"));
        for tool in tools {
            assert!(tool["inputSchema"].is_object());
        }
    }

    #[test]
    fn test_handle_tools_call_unknown_tool() {
        let params = serde_json::json!({
            "name": "nonexistent_tool",
            "arguments": {}
        });
        let result = handle_tools_call(&offline_service(), Some(params));
        assert_eq!(result["isError"], true);
        assert!(
            result["content"][0]["text"]
                .as_str()
                .unwrap()
                .contains("Unknown tool")
        );
    }

    #[test]
    fn test_handle_tools_call_missing_params() {
        let result = handle_tools_call(&offline_service(), None);
        assert_eq!(result["isError"], true);
    }

    #[test]
    fn test_validation_never_reaches_the_network() {
        // Bad diagram type: the panicking transport proves no fetch happens.
        let params = serde_json::json!({
            "name": "generate_diagram_url",
            "arguments": { "type": "visio", "content": "whatever" }
        });
        let result = handle_tools_call(&offline_service(), Some(params));
        assert_eq!(result["isError"], true);
        assert!(
            result["content"][0]["text"]
                .as_str()
                .unwrap()
                .contains("Unsupported diagram type")
        );

        // Bad output format, same guarantee.
        let params = serde_json::json!({
            "name": "download_diagram_image",
            "arguments": {
                "type": "mermaid",
                "content": "graph TD; A-->B;",
                "outputPath": "/tmp/x.bmp",
                "outputFormat": "bmp"
            }
        });
        let result = handle_tools_call(&offline_service(), Some(params));
        assert_eq!(result["isError"], true);
    }

    #[test]
    fn test_generate_url_happy_path() {
        let source = "graph TD; A-->B;";
        let params = serde_json::json!({
            "name": "generate_diagram_url",
            "arguments": { "type": "mermaid", "content": source, "outputFormat": "svg" }
        });
        let result = handle_tools_call(&svg_service(), Some(params));
        assert!(result.get("isError").is_none(), "unexpected error: {result}");
        let url = result["content"][0]["text"].as_str().unwrap();
        let expected_suffix = format!("/mermaid/svg/{}", diagram::encode::encode_source(source));
        assert!(
            url.ends_with(&expected_suffix),
            "url {url} should end with {expected_suffix}"
        );
    }

    #[test]
    fn test_generate_url_missing_content() {
        let params = serde_json::json!({
            "name": "generate_diagram_url",
            "arguments": { "type": "mermaid" }
        });
        let result = handle_tools_call(&offline_service(), Some(params));
        assert_eq!(result["isError"], true);
        assert!(
            result["content"][0]["text"]
                .as_str()
                .unwrap()
                .contains("'content'")
        );
    }

    #[test]
    fn test_download_rejects_non_numeric_scale() {
        let params = serde_json::json!({
            "name": "download_diagram_image",
            "arguments": {
                "type": "mermaid",
                "content": "graph TD; A-->B;",
                "outputPath": "/tmp/x.svg",
                "scale": "big"
            }
        });
        let result = handle_tools_call(&offline_service(), Some(params));
        assert_eq!(result["isError"], true);
        assert!(
            result["content"][0]["text"]
                .as_str()
                .unwrap()
                .contains("'scale' must be a number")
        );
    }
}
