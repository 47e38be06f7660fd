use chrono::{DateTime, Utc};
use log::{debug, info};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::Interval;

use crate::client::DeviceSource;
use crate::models::{Device, Sample};
use crate::renderer::widgets;

/// Fixed per-device poll cadence.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug)]
struct ViewState {
    samples: Vec<Sample>,
    active: bool,
    last_updated: Option<DateTime<Utc>>,
    consecutive_failures: u64,
}

type SharedState = Arc<Mutex<ViewState>>;

fn lock(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    // Every write replaces whole fields, so a poisoned guard still holds a consistent snapshot
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Polls one device's sample endpoint and renders its latest samples.
///
/// Each view owns its own poll task. Ticks fire every [`POLL_INTERVAL`]
/// starting at activation and never wait for earlier fetches, so several
/// fetches for the same device can be in flight; whichever completes last
/// wins. A failed fetch leaves the previous samples on display.
///
/// Activation must happen inside a tokio runtime.
pub struct DeviceView {
    device: Device,
    source: Arc<dyn DeviceSource>,
    state: SharedState,
    poll_task: Option<JoinHandle<()>>,
}

impl DeviceView {
    pub fn new(device: Device, source: Arc<dyn DeviceSource>) -> Self {
        let state = ViewState {
            samples: vec![Sample::placeholder()],
            active: false,
            last_updated: None,
            consecutive_failures: 0,
        };

        Self {
            device,
            source,
            state: Arc::new(Mutex::new(state)),
            poll_task: None,
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Fetch immediately, then every [`POLL_INTERVAL`]. Does nothing if already polling.
    pub fn activate(&mut self) {
        if self.poll_task.is_some() {
            return;
        }

        lock(&self.state).active = true;

        // Anchor the cadence here rather than at the task's first poll
        let interval = tokio::time::interval(POLL_INTERVAL);
        let task = tokio::spawn(poll_loop(
            interval,
            self.device.address.clone(),
            Arc::clone(&self.source),
            Arc::clone(&self.state),
        ));
        self.poll_task = Some(task);

        info!(
            "Polling {} device at {}",
            self.device.device_type, self.device.address
        );
    }

    /// Stop polling. Once this returns, no fetch (pending or in flight) can
    /// change this view's samples.
    pub fn deactivate(&mut self) {
        lock(&self.state).active = false;

        if let Some(task) = self.poll_task.take() {
            task.abort();
            debug!("Stopped polling device at {}", self.device.address);
        }
    }

    pub fn is_active(&self) -> bool {
        lock(&self.state).active
    }

    pub fn samples(&self) -> Vec<Sample> {
        lock(&self.state).samples.clone()
    }

    /// When the displayed samples were fetched, `None` while the placeholder is shown.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        lock(&self.state).last_updated
    }

    pub fn consecutive_failures(&self) -> u64 {
        lock(&self.state).consecutive_failures
    }

    /// `"<device_type> : <samples>"`
    pub fn render_text(&self) -> String {
        widgets::device_heading(&self.device, &self.samples())
    }

    pub fn render_html(&self) -> String {
        widgets::device_html(&self.device, &self.samples())
    }
}

impl Drop for DeviceView {
    fn drop(&mut self) {
        self.deactivate();
    }
}

async fn poll_loop(
    mut interval: Interval,
    address: String,
    source: Arc<dyn DeviceSource>,
    state: SharedState,
) {
    // Dropping the set (when this task is aborted) aborts every in-flight fetch
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                in_flight.spawn(poll_once(
                    address.clone(),
                    Arc::clone(&source),
                    Arc::clone(&state),
                ));
            }
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
        }
    }
}

async fn poll_once(address: String, source: Arc<dyn DeviceSource>, state: SharedState) {
    let start = Instant::now();
    let result = source.fetch_samples(&address).await;

    let mut guard = lock(&state);
    if !guard.active {
        drop(guard);
        debug!("Discarding samples for {} fetched after deactivation", address);
        return;
    }

    match result {
        Ok(samples) => {
            guard.samples = samples;
            guard.last_updated = Some(Utc::now());
            guard.consecutive_failures = 0;
            drop(guard);
            debug!("poll {} took: {} ms", address, start.elapsed().as_millis());
        }
        Err(e) => {
            guard.consecutive_failures += 1;
            let failures = guard.consecutive_failures;
            drop(guard);
            debug!(
                "Sample fetch for {} failed ({} in a row), keeping last samples: {}",
                address, failures, e
            );
        }
    }
}
