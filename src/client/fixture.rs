use async_trait::async_trait;
use std::collections::HashMap;

use crate::client::{ClientError, DeviceSource};
use crate::models::{Device, Sample};

/// Fixed in-memory roster and samples, a drop-in for the device API.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    devices: Vec<Device>,
    samples: HashMap<String, Vec<Sample>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: Device, samples: Vec<Sample>) -> Self {
        self.samples.insert(device.address.clone(), samples);
        self.devices.push(device);
        self
    }

    /// One probe of each common family, as seen on a bench setup.
    pub fn demo() -> Self {
        Self::new()
            .with_device(Device::new("99", "pH"), vec![Sample::new("7.1", "")])
            .with_device(Device::new("98", "ORP"), vec![Sample::new("225.3", "mV")])
            .with_device(
                Device::new("97", "DO"),
                vec![Sample::new("5.0", "mg/L"), Sample::new("53", "%")],
            )
            .with_device(
                Device::new("100", "EC"),
                vec![Sample::new("1413", "μS/cm"), Sample::new("0.7", "ppt")],
            )
    }
}

#[async_trait]
impl DeviceSource for FixtureSource {
    async fn fetch_roster(&self) -> Result<Vec<Device>, ClientError> {
        Ok(self.devices.clone())
    }

    async fn fetch_samples(&self, address: &str) -> Result<Vec<Sample>, ClientError> {
        self.samples
            .get(address)
            .cloned()
            .ok_or_else(|| ClientError::UnknownDevice(address.to_string()))
    }
}
