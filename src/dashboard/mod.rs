use std::sync::Arc;

use crate::client::DeviceSource;
use crate::renderer::widgets;

pub mod device_list;
pub mod device_view;

pub use device_list::DeviceListView;
pub use device_view::{DeviceView, POLL_INTERVAL};

/// Top of the dashboard: a title over the device list.
pub struct AppShell {
    title: String,
    device_list: DeviceListView,
}

impl AppShell {
    /// `source` may be the device API or a fixture; the list cannot tell.
    pub fn with_source(title: impl Into<String>, source: Arc<dyn DeviceSource>) -> Self {
        Self {
            title: title.into(),
            device_list: DeviceListView::new(source),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn device_list(&self) -> &DeviceListView {
        &self.device_list
    }

    pub async fn activate(&mut self) {
        self.device_list.activate().await;
    }

    pub fn deactivate(&mut self) {
        self.device_list.deactivate();
    }

    pub fn render_text(&self) -> String {
        let mut lines = vec![self.title.clone()];
        lines.extend(self.device_list.render_text());
        lines.join("\n")
    }

    pub fn render_html(&self) -> String {
        widgets::page_html(&self.title, &self.device_list.render_html())
    }
}
