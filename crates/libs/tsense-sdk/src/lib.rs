//! Synchronous client SDK for the sensor's JSON-RPC control interface.
//!
//! Every operation is one blocking HTTP POST to the device's `/rpc`
//! endpoint. Device-side rejections come back as [`Outcome::Rejected`]
//! values; only transport and decoding failures are `Err`.

pub mod client;
pub mod config;
pub mod error;
pub mod info;
pub mod retry;

pub use client::{Outcome, SensorClient};
pub use config::Endpoint;
pub use error::{InfoError, SdkError};
pub use info::{SensorInfo, FIRMWARE_MAX, FIRMWARE_MIN, MIN_READING_INTERVAL};
pub use tsense_rpc::{error_code, Method, RawRequest, RpcError, RpcReply, RpcRequest};
