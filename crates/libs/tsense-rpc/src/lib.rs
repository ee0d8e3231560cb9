//! Wire protocol for the sensor's JSON-RPC 2.0 control interface.

pub mod envelope;
pub mod error_code;

pub use envelope::{Method, RawRequest, RpcError, RpcReply, RpcRequest};
