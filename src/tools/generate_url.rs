//! Handler for the `generate_diagram_url` MCP tool.

use serde_json::Value;

use crate::diagram::client::Transport;
use crate::diagram::render::DiagramService;
use crate::diagram::types::{OutputFormat, RenderRequest};

use super::{required_str, tool_arguments, tool_error, tool_text};

/// Execute the `generate_diagram_url` tool.
pub fn handle_generate_diagram_url<T: Transport>(
    service: &DiagramService<T>,
    params: &Value,
) -> Value {
    let arguments = match tool_arguments(params) {
        Ok(args) => args,
        Err(error) => return error,
    };

    let type_name = match required_str(arguments, "type") {
        Ok(value) => value,
        Err(error) => return error,
    };
    let content = match required_str(arguments, "content") {
        Ok(value) => value,
        Err(error) => return error,
    };

    let format = match arguments.get("outputFormat").and_then(Value::as_str) {
        Some(name) => match OutputFormat::parse(name) {
            Ok(format) => format,
            Err(e) => return tool_error(&e.to_string()),
        },
        None => OutputFormat::Svg,
    };

    let request = match RenderRequest::new(type_name, content, format, None) {
        Ok(request) => request,
        Err(e) => return tool_error(&e.to_string()),
    };

    match service.generate_url(&request) {
        Ok(url) => tool_text(&url),
        Err(e) => tool_error(&e.to_string()),
    }
}
