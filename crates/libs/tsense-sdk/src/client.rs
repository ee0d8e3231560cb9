use crate::config::Endpoint;
use crate::error::SdkError;
use crate::info::SensorInfo;
use crate::retry;
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;
use tsense_rpc::{Method, RpcError, RpcReply, RpcRequest};

/// How long `reset_to_factory` waits for the device to report a valid info
/// record again.
pub const RESET_POLL_ATTEMPTS: u32 = 15;
pub const RESET_POLL_DELAY: Duration = Duration::from_secs(1);

/// Outcome of an operation the device may refuse at the domain level.
/// Rejections are values, not errors; callers match instead of unwrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Accepted(T),
    Rejected(RpcError),
}

impl<T> Outcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn accepted(self) -> Option<T> {
        match self {
            Outcome::Accepted(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn rejected(self) -> Option<RpcError> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, RpcError> {
        match self {
            Outcome::Accepted(value) => Ok(value),
            Outcome::Rejected(error) => Err(error),
        }
    }
}

/// Blocking client for the device's `/rpc` endpoint. One HTTP POST per
/// operation, authenticated with the pin in the `Authorization` header.
#[derive(Debug)]
pub struct SensorClient {
    rpc_url: String,
    pin: String,
    agent: ureq::Agent,
}

impl SensorClient {
    pub fn new(endpoint: &Endpoint) -> Self {
        Self::with_timeouts(
            endpoint,
            Duration::from_secs(3),
            Duration::from_secs(10),
            Duration::from_secs(10),
        )
    }

    pub fn with_timeouts(
        endpoint: &Endpoint,
        connect_timeout: Duration,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> Self {
        Self {
            rpc_url: endpoint.rpc_url(),
            pin: endpoint.pin.clone(),
            agent: ureq::AgentBuilder::new()
                .timeout_connect(connect_timeout)
                .timeout_read(read_timeout)
                .timeout_write(write_timeout)
                .build(),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Sends a well-formed envelope for `method` and decodes the reply.
    pub fn call(&self, method: Method, params: Option<JsonValue>) -> Result<RpcReply, SdkError> {
        self.send_raw(&RpcRequest::new(method, params).to_body())
    }

    /// Posts `body` verbatim. The protocol error-path suites shape invalid
    /// envelopes through this.
    pub fn send_raw(&self, body: &str) -> Result<RpcReply, SdkError> {
        log::debug!("POST {} body {body}", self.rpc_url);
        let response = match self
            .agent
            .post(&self.rpc_url)
            .set("Authorization", &self.pin)
            .set("Content-Type", "application/json")
            .send_string(body)
        {
            Ok(response) => response,
            // The device keeps JSON-RPC faults in the body; read those
            // through instead of failing on the status line.
            Err(ureq::Error::Status(_, response)) => response,
            Err(err) => {
                return Err(SdkError::Transport {
                    url: self.rpc_url.clone(),
                    detail: err.to_string(),
                })
            }
        };
        let text = response.into_string().map_err(|err| SdkError::Transport {
            url: self.rpc_url.clone(),
            detail: err.to_string(),
        })?;
        RpcReply::parse(&text).map_err(|err| SdkError::Decode(format!("{err} in {text:?}")))
    }

    pub fn get_info(&self) -> Result<Outcome<SensorInfo>, SdkError> {
        log::info!("get sensor info");
        self.info_outcome(Method::GetInfo, None)
    }

    pub fn get_reading(&self) -> Result<f64, SdkError> {
        log::info!("get sensor reading");
        self.call_typed(Method::GetReading, None)
    }

    pub fn get_methods(&self) -> Result<Vec<String>, SdkError> {
        log::info!("get sensor methods");
        self.call_typed(Method::GetMethods, None)
    }

    pub fn set_name(&self, name: &str) -> Result<Outcome<SensorInfo>, SdkError> {
        log::info!("set sensor name to {name:?}");
        self.info_outcome(Method::SetName, Some(json!({ "name": name })))
    }

    pub fn set_reading_interval(&self, interval: u32) -> Result<Outcome<SensorInfo>, SdkError> {
        log::info!("set sensor reading interval to {interval} seconds");
        self.info_outcome(Method::SetReadingInterval, Some(json!({ "interval": interval })))
    }

    /// Returns the device acknowledgement: `"updating"`, or
    /// `"already at latest firmware version"` once saturated.
    pub fn update_firmware(&self) -> Result<String, SdkError> {
        log::info!("request sensor firmware update");
        self.call_typed(Method::UpdateFirmware, None)
    }

    /// Returns the device acknowledgement, `"rebooting"`.
    pub fn reboot(&self) -> Result<String, SdkError> {
        log::info!("request sensor reboot");
        self.call_typed(Method::Reboot, None)
    }

    /// Restores factory settings and waits for the device to report a valid
    /// info record again.
    pub fn reset_to_factory(&self) -> Result<Outcome<SensorInfo>, SdkError> {
        log::info!("reset sensor to factory settings");
        let result = match self.call(Method::ResetToFactory, None)? {
            RpcReply::Failure { error } => return Ok(Outcome::Rejected(error)),
            RpcReply::Success { result } => result,
        };
        if result != json!("resetting") {
            return Err(SdkError::UnexpectedReply {
                method: Method::ResetToFactory.as_str(),
                detail: format!("expected \"resetting\", got {result}"),
            });
        }
        let ready = retry::wait_until(
            || self.get_info(),
            Outcome::is_accepted,
            RESET_POLL_ATTEMPTS,
            RESET_POLL_DELAY,
        );
        match ready.and_then(Outcome::accepted) {
            Some(info) => Ok(Outcome::Accepted(info)),
            None => Err(SdkError::DeviceUnavailable {
                operation: "factory reset",
            }),
        }
    }

    fn info_outcome(
        &self,
        method: Method,
        params: Option<JsonValue>,
    ) -> Result<Outcome<SensorInfo>, SdkError> {
        match self.call(method, params)? {
            RpcReply::Success { result } => Ok(Outcome::Accepted(SensorInfo::from_result(result)?)),
            RpcReply::Failure { error } => Ok(Outcome::Rejected(error)),
        }
    }

    fn call_typed<T: DeserializeOwned>(
        &self,
        method: Method,
        params: Option<JsonValue>,
    ) -> Result<T, SdkError> {
        match self.call(method, params)? {
            RpcReply::Success { result } => {
                serde_json::from_value(result).map_err(|err| SdkError::UnexpectedReply {
                    method: method.as_str(),
                    detail: err.to_string(),
                })
            }
            RpcReply::Failure { error } => Err(SdkError::UnexpectedReply {
                method: method.as_str(),
                detail: format!("device refused: {error}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection() -> RpcError {
        RpcError {
            code: tsense_rpc::error_code::METHOD_EXECUTION,
            message: "Method execution error".to_string(),
        }
    }

    #[test]
    fn outcome_accessors_split_accepted_and_rejected() {
        let accepted: Outcome<u32> = Outcome::Accepted(7);
        assert!(accepted.is_accepted());
        assert_eq!(accepted.clone().accepted(), Some(7));
        assert_eq!(accepted.rejected(), None);

        let rejected: Outcome<u32> = Outcome::Rejected(rejection());
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.clone().accepted(), None);
        assert_eq!(rejected.rejected(), Some(rejection()));
    }

    #[test]
    fn outcome_converts_into_result() {
        assert_eq!(Outcome::Accepted(7).into_result(), Ok(7));
        assert_eq!(
            Outcome::<u32>::Rejected(rejection()).into_result(),
            Err(rejection())
        );
    }

    #[test]
    fn client_targets_the_endpoint_rpc_url() {
        let client = SensorClient::new(&Endpoint::default());
        assert_eq!(client.rpc_url(), "http://127.0.0.1:9898/rpc");
    }
}
