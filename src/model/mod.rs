pub mod device;
pub mod table;

pub use device::{Device, Prop};
pub use table::{DeviceTable, PropTable};
