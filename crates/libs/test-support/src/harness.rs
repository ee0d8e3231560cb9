use anyhow::{anyhow, Context, Result};
use tsense_sdk::{Endpoint, SensorClient, SensorInfo};

/// The live-device suites run only when this variable is `1`; see
/// `cargo xtask e2e`.
pub const DEVICE_GATE_ENV: &str = "TSENSE_DEVICE_E2E";

pub fn device_gate_enabled() -> bool {
    std::env::var(DEVICE_GATE_ENV).ok().as_deref() == Some("1")
}

/// Connects to the configured device, or returns `None` with a skip notice
/// when the gate is off. Panics on a connection failure: with the gate on,
/// an unreachable device is a suite failure, not a skip.
pub fn device_harness() -> Option<Harness> {
    if !device_gate_enabled() {
        eprintln!("skipping device suite; set {DEVICE_GATE_ENV}=1 to enable");
        return None;
    }
    Some(Harness::connect().expect("device harness must connect"))
}

/// Session-wide connection to the device under test, anchored to the
/// factory baseline every suite assumes as its starting state.
pub struct Harness {
    client: SensorClient,
    baseline: SensorInfo,
}

impl Harness {
    /// Resolves the endpoint, resets the device once and captures the
    /// resulting info record as the factory baseline.
    pub fn connect() -> Result<Self> {
        let endpoint = Endpoint::resolve().context("endpoint resolution failed")?;
        let client = SensorClient::new(&endpoint);
        log::info!("establishing factory baseline via {}", client.rpc_url());
        let baseline = client
            .reset_to_factory()
            .context("initial factory reset failed")?
            .into_result()
            .map_err(|error| anyhow!("device refused the initial factory reset: {error}"))?;
        Ok(Self { client, baseline })
    }

    pub fn client(&self) -> &SensorClient {
        &self.client
    }

    pub fn baseline(&self) -> &SensorInfo {
        &self.baseline
    }

    /// Pre-test guard against cross-test state leakage: the device is the
    /// only shared mutable resource, so any drift from the session baseline
    /// triggers another factory reset.
    pub fn ensure_factory_baseline(&self) -> Result<()> {
        let current = self
            .client
            .get_info()
            .context("baseline check failed")?
            .accepted();
        if current.as_ref() == Some(&self.baseline) {
            return Ok(());
        }
        log::info!("detected non-factory settings, resetting sensor");
        let settled = self
            .client
            .reset_to_factory()
            .context("factory reset failed")?
            .into_result()
            .map_err(|error| anyhow!("device refused the factory reset: {error}"))?;
        if settled != self.baseline {
            log::warn!("device settled on non-baseline settings after reset: {settled:?}");
        }
        Ok(())
    }
}
