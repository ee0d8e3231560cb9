use crate::error::InfoError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub const FIRMWARE_MIN: u32 = 10;
pub const FIRMWARE_MAX: u32 = 15;
pub const MIN_READING_INTERVAL: u32 = 1;

/// Read-only snapshot of the device identity and settings, as reported by
/// `get_info`. Fetched on demand, never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SensorInfo {
    pub name: String,
    pub hid: String,
    pub model: String,
    pub firmware_version: u32,
    pub reading_interval: u32,
}

impl SensorInfo {
    /// Builds a validated record from a successful RPC result. Fractional
    /// or negative numbers fail integer decoding; domain violations are
    /// reported field by field.
    pub fn from_result(value: JsonValue) -> Result<Self, InfoError> {
        let info: SensorInfo =
            serde_json::from_value(value).map_err(|err| InfoError::Malformed(err.to_string()))?;
        info.validate()?;
        Ok(info)
    }

    fn validate(&self) -> Result<(), InfoError> {
        for (field, value) in [
            ("name", &self.name),
            ("hid", &self.hid),
            ("model", &self.model),
        ] {
            if value.is_empty() {
                return Err(InfoError::EmptyField(field));
            }
        }
        if !(FIRMWARE_MIN..=FIRMWARE_MAX).contains(&self.firmware_version) {
            return Err(InfoError::FirmwareVersionOutOfRange {
                value: self.firmware_version,
                min: FIRMWARE_MIN,
                max: FIRMWARE_MAX,
            });
        }
        if self.reading_interval < MIN_READING_INTERVAL {
            return Err(InfoError::ReadingIntervalTooSmall {
                value: self.reading_interval,
                min: MIN_READING_INTERVAL,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn factory_shape() -> JsonValue {
        json!({
            "name": "Temperature sensor",
            "hid": "A7F2-0031",
            "model": "TS-200",
            "firmware_version": 10,
            "reading_interval": 3
        })
    }

    #[test]
    fn accepts_the_factory_shape() {
        let info = SensorInfo::from_result(factory_shape()).expect("factory shape is valid");
        assert_eq!(info.firmware_version, FIRMWARE_MIN);
        assert_eq!(info.reading_interval, 3);
    }

    #[test]
    fn rejects_empty_identity_fields() {
        for field in ["name", "hid", "model"] {
            let mut shape = factory_shape();
            shape[field] = json!("");
            assert_eq!(
                SensorInfo::from_result(shape),
                Err(InfoError::EmptyField(field)),
                "empty '{field}' must be rejected"
            );
        }
    }

    #[test]
    fn rejects_firmware_outside_supported_range() {
        for version in [FIRMWARE_MIN - 1, FIRMWARE_MAX + 1] {
            let mut shape = factory_shape();
            shape["firmware_version"] = json!(version);
            assert!(
                matches!(
                    SensorInfo::from_result(shape),
                    Err(InfoError::FirmwareVersionOutOfRange { value, .. }) if value == version
                ),
                "firmware {version} must be rejected"
            );
        }
    }

    #[test]
    fn rejects_interval_below_one() {
        let mut shape = factory_shape();
        shape["reading_interval"] = json!(0);
        assert!(matches!(
            SensorInfo::from_result(shape),
            Err(InfoError::ReadingIntervalTooSmall { value: 0, .. })
        ));
    }

    #[test]
    fn rejects_non_integer_numbers() {
        let mut shape = factory_shape();
        shape["reading_interval"] = json!(0.4);
        assert!(matches!(
            SensorInfo::from_result(shape),
            Err(InfoError::Malformed(_))
        ));

        let mut shape = factory_shape();
        shape["firmware_version"] = json!(-1);
        assert!(matches!(
            SensorInfo::from_result(shape),
            Err(InfoError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_missing_fields_and_wrong_types() {
        let mut shape = factory_shape();
        shape.as_object_mut().expect("object shape").remove("hid");
        assert!(matches!(
            SensorInfo::from_result(shape),
            Err(InfoError::Malformed(_))
        ));

        let mut shape = factory_shape();
        shape["name"] = json!(42);
        assert!(matches!(
            SensorInfo::from_result(shape),
            Err(InfoError::Malformed(_))
        ));
    }
}
