//! JSON-RPC 2.0 error codes plus the device's method-execution error.

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

/// Server-defined code for domain-level rejections: out-of-range reading
/// interval, empty name, firmware already at the latest version.
pub const METHOD_EXECUTION: i64 = -32000;

/// Message paired with [`METHOD_EXECUTION`] on the wire.
pub const METHOD_EXECUTION_MESSAGE: &str = "Method execution error";
