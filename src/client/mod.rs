use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Device, Sample};

pub mod fixture;
pub mod http;

pub use fixture::FixtureSource;
pub use http::HttpDeviceSource;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unknown device address: {0}")]
    UnknownDevice(String),
}

/// Where the dashboard gets its roster and samples from.
///
/// `HttpDeviceSource` talks to the device API; `FixtureSource` serves a fixed
/// in-memory dataset with the same shapes for demos and tests.
#[async_trait]
pub trait DeviceSource: Send + Sync {
    /// `GET /api/device`
    async fn fetch_roster(&self) -> Result<Vec<Device>, ClientError>;

    /// `GET /api/device/{address}/sample`
    async fn fetch_samples(&self, address: &str) -> Result<Vec<Sample>, ClientError>;
}
