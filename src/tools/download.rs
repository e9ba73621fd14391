//! Handler for the `download_diagram_image` MCP tool.

use std::path::Path;

use serde_json::Value;

use crate::diagram::client::Transport;
use crate::diagram::render::DiagramService;
use crate::diagram::types::{OutputFormat, RenderRequest};

use super::{required_str, tool_arguments, tool_error, tool_text};

/// Execute the `download_diagram_image` tool.
pub fn handle_download_diagram_image<T: Transport>(
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
    let output_path = match required_str(arguments, "outputPath") {
        Ok(value) => value,
        Err(error) => return error,
    };
    let path = Path::new(output_path);

    // Format: explicit argument, else the target extension, else svg.
    let format = match arguments.get("outputFormat").and_then(Value::as_str) {
        Some(name) => match OutputFormat::parse(name) {
            Ok(format) => format,
            Err(e) => return tool_error(&e.to_string()),
        },
        None => OutputFormat::from_extension(path).unwrap_or(OutputFormat::Svg),
    };

    let scale = match arguments.get("scale") {
        Some(value) => match value.as_f64() {
            Some(scale) => Some(scale),
            None => return tool_error("'scale' must be a number"),
        },
        None => None,
    };

    let request = match RenderRequest::new(type_name, content, format, scale) {
        Ok(request) => request,
        Err(e) => return tool_error(&e.to_string()),
    };

    match service.download_image(&request, path) {
        Ok(saved) => tool_text(&format!(
            "Saved {} diagram ({}) to {}",
            request.diagram_type.kroki_name(),
            request.format.as_str(),
            saved.display()
        )),
        Err(e) => tool_error(&e.to_string()),
    }
}
