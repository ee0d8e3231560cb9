use crate::error::SdkError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_HOST: &str = "http://127.0.0.1";
pub const DEFAULT_PORT: u16 = 9898;
pub const DEFAULT_PIN: &str = "0000";

pub const CONFIG_ENV: &str = "TSENSE_CONFIG";
pub const HOST_ENV: &str = "TSENSE_HOST";
pub const PORT_ENV: &str = "TSENSE_PORT";
pub const PIN_ENV: &str = "TSENSE_PIN";

/// Where the sensor's `/rpc` endpoint lives and the pin it expects in the
/// `Authorization` header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub pin: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            pin: DEFAULT_PIN.to_string(),
        }
    }
}

impl Endpoint {
    /// Resolution order: defaults, then the TOML file named by
    /// `TSENSE_CONFIG` (if set), then `TSENSE_HOST`/`TSENSE_PORT`/
    /// `TSENSE_PIN` overrides.
    pub fn resolve() -> Result<Self, SdkError> {
        let base = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load_from_path(Path::new(&path))?,
            _ => Self::default(),
        };
        Ok(base.overlay(|key| std::env::var(key).ok()))
    }

    pub fn load_from_path(path: &Path) -> Result<Self, SdkError> {
        let raw = std::fs::read_to_string(path).map_err(|e| SdkError::Io(e.to_string()))?;
        toml::from_str(&raw).map_err(|e| SdkError::Decode(e.to_string()))
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup(HOST_ENV).filter(|value| !value.trim().is_empty()) {
            self.host = host;
        }
        if let Some(port) = lookup(PORT_ENV).and_then(|value| value.trim().parse().ok()) {
            self.port = port;
        }
        if let Some(pin) = lookup(PIN_ENV).filter(|value| !value.trim().is_empty()) {
            self.pin = pin;
        }
        self
    }

    /// Full URL of the RPC endpoint. Hosts without a scheme get `http://`.
    pub fn rpc_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{host}:{}/rpc", self.port)
        } else {
            format!("http://{host}:{}/rpc", self.port)
        }
    }

    pub fn example_toml() -> String {
        toml::to_string_pretty(&Self::default()).expect("valid endpoint template")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_match_the_device_bench_setup() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.rpc_url(), "http://127.0.0.1:9898/rpc");
        assert_eq!(endpoint.pin, "0000");
    }

    #[test]
    fn overlay_applies_only_present_keys() {
        let vars: HashMap<&str, &str> = [(HOST_ENV, "http://sensor.lan"), (PIN_ENV, "4242")]
            .into_iter()
            .collect();
        let endpoint =
            Endpoint::default().overlay(|key| vars.get(key).map(|value| value.to_string()));
        assert_eq!(endpoint.host, "http://sensor.lan");
        assert_eq!(endpoint.port, DEFAULT_PORT);
        assert_eq!(endpoint.pin, "4242");
    }

    #[test]
    fn overlay_ignores_blank_and_unparsable_values() {
        let vars: HashMap<&str, &str> = [(HOST_ENV, "  "), (PORT_ENV, "not-a-port")]
            .into_iter()
            .collect();
        let endpoint =
            Endpoint::default().overlay(|key| vars.get(key).map(|value| value.to_string()));
        assert_eq!(endpoint, Endpoint::default());
    }

    #[test]
    fn rpc_url_normalizes_scheme_and_trailing_slash() {
        let endpoint = Endpoint {
            host: "sensor.lan/".to_string(),
            port: 9000,
            pin: DEFAULT_PIN.to_string(),
        };
        assert_eq!(endpoint.rpc_url(), "http://sensor.lan:9000/rpc");

        let endpoint = Endpoint {
            host: "https://sensor.lan".to_string(),
            port: 9000,
            pin: DEFAULT_PIN.to_string(),
        };
        assert_eq!(endpoint.rpc_url(), "https://sensor.lan:9000/rpc");
    }

    #[test]
    fn loads_partial_config_files_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp config file");
        writeln!(file, "port = 9899\npin = \"1234\"").expect("write config");

        let endpoint = Endpoint::load_from_path(file.path()).expect("config loads");
        assert_eq!(endpoint.host, DEFAULT_HOST);
        assert_eq!(endpoint.port, 9899);
        assert_eq!(endpoint.pin, "1234");
    }

    #[test]
    fn load_reports_missing_file_and_bad_toml() {
        assert!(matches!(
            Endpoint::load_from_path(Path::new("/nonexistent/tsense.toml")),
            Err(SdkError::Io(_))
        ));

        let mut file = tempfile::NamedTempFile::new().expect("temp config file");
        writeln!(file, "port = \"not a number\"").expect("write config");
        assert!(matches!(
            Endpoint::load_from_path(file.path()),
            Err(SdkError::Decode(_))
        ));
    }

    #[test]
    fn example_template_round_trips() {
        let endpoint: Endpoint =
            toml::from_str(&Endpoint::example_toml()).expect("template parses");
        assert_eq!(endpoint, Endpoint::default());
    }
}
