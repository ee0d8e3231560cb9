use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

pub const JSONRPC_VERSION: &str = "2.0";

/// The device correlates requests loosely, so a fixed id is sufficient.
pub const DEFAULT_REQUEST_ID: u64 = 1;

/// Methods the device's `/rpc` endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    GetInfo,
    GetReading,
    SetName,
    GetMethods,
    SetReadingInterval,
    ResetToFactory,
    UpdateFirmware,
    Reboot,
}

impl Method {
    pub const ALL: [Method; 8] = [
        Method::GetInfo,
        Method::GetReading,
        Method::SetName,
        Method::GetMethods,
        Method::SetReadingInterval,
        Method::ResetToFactory,
        Method::UpdateFirmware,
        Method::Reboot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::GetInfo => "get_info",
            Method::GetReading => "get_reading",
            Method::SetName => "set_name",
            Method::GetMethods => "get_methods",
            Method::SetReadingInterval => "set_reading_interval",
            Method::ResetToFactory => "reset_to_factory",
            Method::UpdateFirmware => "update_firmware",
            Method::Reboot => "reboot",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcRequest {
    pub method: Method,
    pub jsonrpc: String,
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
}

impl RpcRequest {
    pub fn new(method: Method, params: Option<JsonValue>) -> Self {
        Self {
            method,
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: DEFAULT_REQUEST_ID,
            params,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn to_body(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Request body with every field optional, for shaping envelopes the device
/// must refuse: missing method, wrong protocol version, missing id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RawRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
}

impl RawRequest {
    pub fn method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    pub fn jsonrpc(mut self, version: &str) -> Self {
        self.jsonrpc = Some(version.to_string());
        self
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn params(mut self, params: JsonValue) -> Self {
        self.params = Some(params);
        self
    }

    pub fn to_body(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// A decoded response envelope: a result or a structured error, nothing
/// else is a valid shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RpcReply {
    Success { result: JsonValue },
    Failure { error: RpcError },
}

impl RpcReply {
    pub fn parse(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn result(&self) -> Option<&JsonValue> {
        match self {
            RpcReply::Success { result } => Some(result),
            RpcReply::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&RpcError> {
        match self {
            RpcReply::Success { .. } => None,
            RpcReply::Failure { error } => Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
