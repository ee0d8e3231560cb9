use thiserror::Error;

/// Violations detected while building a [`SensorInfo`](crate::info::SensorInfo)
/// from an RPC result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfoError {
    #[error("info payload is not a well-formed record: {0}")]
    Malformed(String),
    #[error("'{0}' must be a non-empty string")]
    EmptyField(&'static str),
    #[error("'firmware_version' must be between {min} and {max}, got {value}")]
    FirmwareVersionOutOfRange { value: u32, min: u32, max: u32 },
    #[error("'reading_interval' must be {min} or more, got {value}")]
    ReadingIntervalTooSmall { value: u32, min: u32 },
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("transport failure talking to {url}: {detail}")]
    Transport { url: String, detail: String },
    #[error("io failure: {0}")]
    Io(String),
    #[error("failed to decode rpc reply: {0}")]
    Decode(String),
    #[error(transparent)]
    Info(#[from] InfoError),
    #[error("unexpected reply to {method}: {detail}")]
    UnexpectedReply {
        method: &'static str,
        detail: String,
    },
    #[error("device did not report a valid info record after {operation}")]
    DeviceUnavailable { operation: &'static str },
}
