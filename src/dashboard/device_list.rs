use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::client::DeviceSource;
use crate::dashboard::device_view::DeviceView;

/// Fetches the roster once and runs one [`DeviceView`] per device.
///
/// If the roster fetch fails the list stays empty: there is no retry and no
/// error is shown.
pub struct DeviceListView {
    source: Arc<dyn DeviceSource>,
    views: Vec<DeviceView>,
    roster_requested: bool,
}

impl DeviceListView {
    pub fn new(source: Arc<dyn DeviceSource>) -> Self {
        Self {
            source,
            views: Vec::new(),
            roster_requested: false,
        }
    }

    pub async fn activate(&mut self) {
        if self.roster_requested {
            return;
        }
        self.roster_requested = true;

        let start = Instant::now();
        match self.source.fetch_roster().await {
            Ok(devices) => {
                info!("Roster lists {} device(s)", devices.len());
                for device in devices {
                    let mut view = DeviceView::new(device, Arc::clone(&self.source));
                    view.activate();
                    self.views.push(view);
                }
            }
            Err(e) => {
                warn!("Failed to fetch device roster, showing no devices: {}", e);
            }
        }
        debug!("Roster fetch took: {} ms", start.elapsed().as_millis());
    }

    pub fn deactivate(&mut self) {
        for view in &mut self.views {
            view.deactivate();
        }
    }

    /// Views in roster order.
    pub fn views(&self) -> &[DeviceView] {
        &self.views
    }

    pub fn render_text(&self) -> Vec<String> {
        self.views.iter().map(DeviceView::render_text).collect()
    }

    pub fn render_html(&self) -> Vec<String> {
        self.views.iter().map(DeviceView::render_html).collect()
    }
}
