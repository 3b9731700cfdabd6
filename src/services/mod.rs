pub mod device_source;

pub use device_source::{create_device_source, DeviceSource};
