//! Tool registration, descriptors, and dispatch for the MCP server.
//!
//! Owns the tool registry: builds the `tools/list` response and dispatches
//! `tools/call` requests to the per-tool handlers.

pub mod download;
pub mod generate_url;

use serde_json::Value;

use crate::diagram::client::Transport;
use crate::diagram::render::DiagramService;
use crate::diagram::types::supported_type_names;

pub use download::handle_download_diagram_image;
pub use generate_url::handle_generate_diagram_url;

/// Supported output format names, for schemas and error messages.
const OUTPUT_FORMATS: &[&str] = &["svg", "png", "pdf", "jpeg", "base64"];

/// Build the tool descriptor for `generate_diagram_url`.
fn generate_diagram_url_tool() -> Value {
    serde_json::json!({
        "name": "generate_diagram_url",
        "description": "Generate a shareable Kroki render URL for a diagram. \
            The diagram is rendered once to verify it is valid before the URL \
            is returned.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "description": "Diagram grammar",
                    "enum": supported_type_names()
                },
                "content": {
                    "type": "string",
                    "description": "Diagram source text"
                },
                "outputFormat": {
                    "type": "string",
                    "description": "Output format (default: svg)",
                    "enum": OUTPUT_FORMATS
                }
            },
            "required": ["type", "content"]
        }
    })
}

/// Build the tool descriptor for `download_diagram_image`.
fn download_diagram_image_tool() -> Value {
    serde_json::json!({
        "name": "download_diagram_image",
        "description": "Render a diagram via Kroki and save it to a local file. \
            The output format is taken from outputFormat, else from the file \
            extension, else svg. Parent directories are created as needed.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "description": "Diagram grammar",
                    "enum": supported_type_names()
                },
                "content": {
                    "type": "string",
                    "description": "Diagram source text"
                },
                "outputPath": {
                    "type": "string",
                    "description": "Absolute or relative path of the file to write"
                },
                "outputFormat": {
                    "type": "string",
                    "description": "Output format (default: from file extension, else svg)",
                    "enum": OUTPUT_FORMATS
                },
                "scale": {
                    "type": "number",
                    "description": "Scale factor for svg output (default 1.0, minimum 0.1)"
                }
            },
            "required": ["type", "content", "outputPath"]
        }
    })
}

/// Handle the `tools/list` request.
pub fn handle_tools_list() -> Value {
    serde_json::json!({
        "tools": [generate_diagram_url_tool(), download_diagram_image_tool()]
    })
}

/// Handle the `tools/call` request.
pub fn handle_tools_call<T: Transport>(
    service: &DiagramService<T>,
    params: Option<Value>,
) -> Value {
    let Some(params) = params else {
        return tool_error("Missing params for tools/call");
    };

    let name = params.get("name").and_then(Value::as_str).unwrap_or("");

    match name {
        "generate_diagram_url" => handle_generate_diagram_url(service, &params),
        "download_diagram_image" => handle_download_diagram_image(service, &params),
        _ => tool_error(&format!("Unknown tool: {name}")),
    }
}

/// Build a tool error result.
pub fn tool_error(message: &str) -> Value {
    serde_json::json!({
        "isError": true,
        "content": [{
            "type": "text",
            "text": message
        }]
    })
}

/// Build a plain-text tool success result.
pub fn tool_text(message: &str) -> Value {
    serde_json::json!({
        "content": [{
            "type": "text",
            "text": message
        }]
    })
}

/// Extract the `arguments` object shared by both tool handlers.
pub(crate) fn tool_arguments(params: &Value) -> Result<&Value, Value> {
    match params.get("arguments") {
        Some(args) if args.is_object() => Ok(args),
        Some(_) => Err(tool_error("'arguments' must be an object")),
        None => Err(tool_error("Missing 'arguments' in tools/call params")),
    }
}

/// Extract a required string argument.
pub(crate) fn required_str<'a>(arguments: &'a Value, key: &str) -> Result<&'a str, Value> {
    match arguments.get(key) {
        Some(value) => value
            .as_str()
            .ok_or_else(|| tool_error(&format!("'{key}' must be a string"))),
        None => Err(tool_error(&format!("Missing '{key}' in tool arguments"))),
    }
}
