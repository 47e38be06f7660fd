use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

use crate::client::{ClientError, DeviceSource};
use crate::models::{Device, Sample};

pub struct HttpDeviceSource {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpDeviceSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        // reqwest::Client::new() is infallible, use it if the builder fails
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            http_client,
            base_url,
        }
    }

    pub fn roster_url(&self) -> String {
        format!("{}/api/device", self.base_url)
    }

    pub fn sample_url(&self, address: &str) -> String {
        format!("{}/api/device/{}/sample", self.base_url, address)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ClientError> {
        let start = Instant::now();
        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }

        let body = response.bytes().await?;
        let parsed = serde_json::from_slice(&body)?;
        debug!("GET {} took: {} ms", url, start.elapsed().as_millis());
        Ok(parsed)
    }
}

#[async_trait]
impl DeviceSource for HttpDeviceSource {
    async fn fetch_roster(&self) -> Result<Vec<Device>, ClientError> {
        self.get_json(self.roster_url()).await
    }

    async fn fetch_samples(&self, address: &str) -> Result<Vec<Sample>, ClientError> {
        self.get_json(self.sample_url(address)).await
    }
}
