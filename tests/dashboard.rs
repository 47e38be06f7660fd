use async_trait::async_trait;
use atlasdash::client::{ClientError, DeviceSource, FixtureSource};
use atlasdash::dashboard::AppShell;
use atlasdash::models::{Device, Sample};
use reqwest::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

/// Roster plus a queue of replies per address; `None` is a failed fetch.
#[derive(Default)]
struct ScriptedApi {
    roster: Option<Vec<Device>>,
    replies: Mutex<HashMap<String, VecDeque<Option<Vec<Sample>>>>>,
}

impl ScriptedApi {
    fn with_roster(devices: Vec<Device>) -> Self {
        Self {
            roster: Some(devices),
            ..Self::default()
        }
    }

    fn reply(self, address: &str, reply: Option<Vec<Sample>>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_default()
            .push_back(reply);
        self
    }
}

#[async_trait]
impl DeviceSource for ScriptedApi {
    async fn fetch_roster(&self) -> Result<Vec<Device>, ClientError> {
        self.roster.clone().ok_or_else(|| ClientError::Status {
            url: "/api/device".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        })
    }

    async fn fetch_samples(&self, address: &str) -> Result<Vec<Sample>, ClientError> {
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(address)
            .and_then(VecDeque::pop_front)
            .flatten();
        reply.ok_or_else(|| ClientError::Status {
            url: format!("/api/device/{}/sample", address),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        })
    }
}

async fn start(title: &str, source: impl DeviceSource + 'static) -> AppShell {
    let mut shell = AppShell::with_source(title, Arc::new(source));
    shell.activate().await;
    shell
}

#[tokio::test(start_paused = true)]
async fn test_single_unitless_sample() {
    let api = ScriptedApi::with_roster(vec![Device::new("a1", "PH")])
        .reply("a1", Some(vec![Sample::new("7.1", "")]));
    let mut shell = start("Dashboard", api).await;

    sleep(Duration::from_millis(50)).await;
    assert!(shell.render_text().contains("PH : 7.1"));
    shell.deactivate();
}

#[tokio::test(start_paused = true)]
async fn test_multiple_samples_with_units() {
    let api = ScriptedApi::with_roster(vec![Device::new("61", "DO")]).reply(
        "61",
        Some(vec![Sample::new("5.0", "mg/L"), Sample::new("53", "%")]),
    );
    let mut shell = start("Dashboard", api).await;

    sleep(Duration::from_millis(50)).await;
    assert!(shell.render_text().contains("5.0 mg/L 53 %"));
    shell.deactivate();
}

#[tokio::test(start_paused = true)]
async fn test_failed_second_tick_keeps_first_samples() {
    let api = ScriptedApi::with_roster(vec![Device::new("a1", "PH")])
        .reply("a1", Some(vec![Sample::new("7.1", "")]))
        .reply("a1", None);
    let mut shell = start("Dashboard", api).await;

    sleep(Duration::from_millis(50)).await;
    let after_first = shell.device_list().views()[0].samples();

    sleep(Duration::from_millis(1000)).await;
    let view = &shell.device_list().views()[0];
    assert_eq!(view.consecutive_failures(), 1);
    assert_eq!(view.samples(), after_first);
    assert_eq!(view.render_text(), "PH : 7.1");
    shell.deactivate();
}

#[tokio::test(start_paused = true)]
async fn test_roster_failure_renders_no_devices() {
    let mut shell = start("Dashboard", ScriptedApi::default()).await;

    sleep(Duration::from_millis(3000)).await;
    assert!(shell.device_list().views().is_empty());
    assert_eq!(shell.render_text(), "Dashboard");
    assert!(!shell.render_html().contains("<h1"));
    shell.deactivate();
}

#[tokio::test(start_paused = true)]
async fn test_devices_poll_independently() {
    let api = ScriptedApi::with_roster(vec![Device::new("a1", "PH"), Device::new("b2", "ORP")])
        .reply("a1", Some(vec![Sample::new("7.1", "")]))
        .reply("a1", Some(vec![Sample::new("7.2", "")]))
        .reply("b2", None)
        .reply("b2", Some(vec![Sample::new("225", "mV")]));
    let mut shell = start("Dashboard", api).await;

    sleep(Duration::from_millis(50)).await;
    assert_eq!(shell.render_text(), "Dashboard\nPH : 7.1\nORP : ...");

    sleep(Duration::from_millis(1000)).await;
    assert_eq!(shell.render_text(), "Dashboard\nPH : 7.2\nORP : 225 mV");

    // Both queues are drained, so later ticks fail and nothing changes
    sleep(Duration::from_millis(3000)).await;
    assert_eq!(shell.render_text(), "Dashboard\nPH : 7.2\nORP : 225 mV");
    shell.deactivate();
}

#[tokio::test(start_paused = true)]
async fn test_fixture_is_a_drop_in_source() {
    let mut shell = start("Bench", FixtureSource::demo()).await;

    sleep(Duration::from_millis(50)).await;
    assert_eq!(
        shell.render_text(),
        "Bench\npH : 7.1\nORP : 225.3 mV\nDO : 5.0 mg/L 53 %\nEC : 1413 μS/cm 0.7 ppt"
    );
    shell.deactivate();
}
