use crate::models::{Device, Sample};
use crate::renderer::format_samples;

const HEADING_CLASSES: &str = "p-3 mb-2 text-white";

pub fn device_heading(device: &Device, samples: &[Sample]) -> String {
    format!("{} : {}", device.device_type.label(), format_samples(samples))
}

pub fn device_html(device: &Device, samples: &[Sample]) -> String {
    format!(
        "<div><h1 class=\"{} {}\">{}</h1></div>",
        HEADING_CLASSES,
        html_escape(&device.device_type.style_class()),
        html_escape(&device_heading(device, samples))
    )
}

pub fn page_html(title: &str, device_fragments: &[String]) -> String {
    format!(
        "<div><div class=\"header\">{}</div><div>{}</div></div>",
        html_escape(title),
        device_fragments.concat()
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
