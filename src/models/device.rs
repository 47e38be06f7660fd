use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// The backend reports I2C addresses as integers, older builds as strings
fn deserialize_address<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAddress {
        Text(String),
        Number(u64),
    }

    match RawAddress::deserialize(deserializer)? {
        RawAddress::Text(value) => Ok(value),
        RawAddress::Number(value) => Ok(value.to_string()),
    }
}

/// Probe family reported in the roster's `device_type` field.
///
/// The label is kept exactly as the backend sent it, so `"pH"` and `"PH"`
/// both map to [`DeviceType::Ph`] but render differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceType {
    Ph(String),
    Orp(String),
    Do(String),
    Ec(String),
    Rtd(String),
    Co2(String),
    Other(String),
}

impl DeviceType {
    pub fn parse(label: &str) -> Self {
        let label_owned = label.to_string();
        match label.to_ascii_uppercase().as_str() {
            "PH" => DeviceType::Ph(label_owned),
            "ORP" => DeviceType::Orp(label_owned),
            "DO" => DeviceType::Do(label_owned),
            "EC" => DeviceType::Ec(label_owned),
            "RTD" => DeviceType::Rtd(label_owned),
            "CO2" => DeviceType::Co2(label_owned),
            _ => DeviceType::Other(label_owned),
        }
    }

    /// The label as given by the roster.
    pub fn label(&self) -> &str {
        match self {
            DeviceType::Ph(label)
            | DeviceType::Orp(label)
            | DeviceType::Do(label)
            | DeviceType::Ec(label)
            | DeviceType::Rtd(label)
            | DeviceType::Co2(label)
            | DeviceType::Other(label) => label,
        }
    }

    /// Cosmetic class name, e.g. `ph_device`.
    pub fn style_class(&self) -> String {
        format!("{}_device", self.label().to_lowercase())
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DeviceType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for DeviceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(DeviceType::parse(&label))
    }
}

/// One entry of the `GET /api/device` roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(deserialize_with = "deserialize_address")]
    pub address: String,
    pub device_type: DeviceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
}

impl Device {
    pub fn new(address: impl Into<String>, device_type: &str) -> Self {
        Self {
            address: address.into(),
            device_type: DeviceType::parse(device_type),
            vendor: None,
            firmware_version: None,
        }
    }
}
