//! JSON-RPC 2.0 wire types and stdout framing.
//!
//! The minimal surface needed for a line-delimited JSON-RPC 2.0 server over
//! stdio: incoming message deserialization, outgoing response serialization,
//! and the standard error constructors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;

/// JSON-RPC error code for malformed JSON.
pub const PARSE_ERROR: i64 = -32700;
/// JSON-RPC error code for an unknown method.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// An incoming JSON-RPC 2.0 message. A missing `id` marks a notification.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    #[allow(dead_code)] // Required by the JSON-RPC framing; never read.
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

/// An outgoing JSON-RPC 2.0 response.
#[derive(Debug, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Value,
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl Response {
    /// Build a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Response {
            jsonrpc: "2.0",
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Build an error response.
    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Response {
            jsonrpc: "2.0",
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }

    /// Build a method-not-found error response.
    pub fn method_not_found(id: Value, method: &str) -> Self {
        Response::error(id, METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    /// Build a parse error response. Parse errors carry a null id because
    /// the request id could not be read.
    pub fn parse_error() -> Self {
        Response::error(Value::Null, PARSE_ERROR, "Parse error")
    }
}

/// Write a response to the writer as a single newline-terminated line and
/// flush it. I/O failures are logged; there is nowhere else to report them.
pub fn send_response(out: &mut impl Write, response: &Response) {
    match serde_json::to_string(response) {
        Ok(json) => {
            if let Err(e) = writeln!(out, "{json}").and_then(|()| out.flush()) {
                log::error!("failed to write response: {e}");
            }
        }
        Err(e) => log::error!("failed to serialize response: {e}"),
    }
}
