pub mod device;
pub mod sample;

pub use device::{Device, DeviceType};
pub use sample::Sample;
