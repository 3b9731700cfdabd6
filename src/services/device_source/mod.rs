//! DeviceSource service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for listing input devices,
//! listing their properties and writing a property value. They MUST NOT track
//! selection or dialog state; that belongs to the app layer.

mod dry_run;
mod parser;
mod xinput;
mod r#trait;

pub use self::r#trait::{create_device_source, DeviceSource};
