pub mod format;
pub mod widgets;

pub use format::{format_sample, format_samples};
