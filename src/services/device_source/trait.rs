use crate::config::Config;
use crate::error::Result;
use crate::model::{Device, Prop};

/// Trait for device sources that provide and modify input device properties
#[async_trait::async_trait]
pub trait DeviceSource: Send + Sync {
    /// List input devices in the order the backend reports them
    async fn list_devices(&self) -> Result<Vec<Device>>;

    /// List properties of one device
    async fn list_props(&self, device_id: u32) -> Result<Vec<Prop>>;

    /// Set a property value, given in the same textual form `list_props` returns
    async fn set_prop(&self, device_id: u32, prop_id: u32, value: &str) -> Result<()>;
}

/// Factory function to create an appropriate device source based on the dry_run flag
pub fn create_device_source(config: &Config, dry_run: bool) -> Box<dyn DeviceSource> {
    if dry_run {
        Box::new(super::dry_run::DryRunSource::new())
    } else {
        Box::new(super::xinput::XinputSource::new(&config.xinput.binary))
    }
}
