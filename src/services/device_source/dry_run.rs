use super::parser::split_value;
use super::r#trait::DeviceSource;
use crate::error::{XinputError, Result};
use crate::model::{Device, Prop};
use parking_lot::RwLock;
use tracing::info;

/// Источник с набором демонстрационных устройств в памяти; `set_prop` меняет хранилище
pub struct DryRunSource {
    devices: Vec<Device>,
    props: RwLock<Vec<(u32, Prop)>>,
}

impl DryRunSource {
    pub fn new() -> Self {
        info!("Dry-run режим - DeviceSource работает в режиме эмуляции");

        let devices = vec![
            Device::new(2, "Virtual core pointer", "master pointer"),
            Device::new(4, "Virtual core XTEST pointer", "slave pointer"),
            Device::new(11, "Logitech USB Optical Mouse", "slave pointer"),
            Device::new(12, "SynPS/2 Synaptics TouchPad", "slave pointer"),
            Device::new(3, "Virtual core keyboard", "master keyboard"),
            Device::new(13, "AT Translated Set 2 keyboard", "slave keyboard"),
        ];

        let props = vec![
            (4, Prop::new(150, "Device Enabled", "1")),
            (4, Prop::new(151, "Coordinate Transformation Matrix", "1.000000, 0.000000, 0.000000, 0.000000, 1.000000, 0.000000, 0.000000, 0.000000, 1.000000")),
            (4, Prop::new(270, "XTEST Device", "1")),
            (11, Prop::new(150, "Device Enabled", "1")),
            (11, Prop::new(151, "Coordinate Transformation Matrix", "1.000000, 0.000000, 0.000000, 0.000000, 1.000000, 0.000000, 0.000000, 0.000000, 1.000000")),
            (11, Prop::new(283, "libinput Accel Speed", "0.000000")),
            (11, Prop::new(291, "libinput Accel Profile Enabled", "1, 0")),
            (11, Prop::new(300, "libinput Natural Scrolling Enabled", "0")),
            (11, Prop::new(266, "Device Node", "\"/dev/input/event5\"")),
            (12, Prop::new(150, "Device Enabled", "1")),
            (12, Prop::new(283, "libinput Accel Speed", "0.250000")),
            (12, Prop::new(300, "libinput Natural Scrolling Enabled", "1")),
            (12, Prop::new(310, "libinput Tapping Enabled", "1")),
            (12, Prop::new(287, "libinput Click Methods Available", "1, 1")),
            (12, Prop::new(266, "Device Node", "\"/dev/input/event6\"")),
            (13, Prop::new(150, "Device Enabled", "1")),
            (13, Prop::new(266, "Device Node", "\"/dev/input/event3\"")),
        ];

        Self {
            devices,
            props: RwLock::new(props),
        }
    }

    fn ensure_device(&self, device_id: u32) -> Result<()> {
        if self.devices.iter().any(|d| d.id == device_id) {
            Ok(())
        } else {
            Err(XinputError::CommandFailed {
                command: format!("xinput list-props {}", device_id),
                code: Some(1),
                stderr: format!("unable to find device {}", device_id),
            })
        }
    }
}

impl Default for DryRunSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DeviceSource for DryRunSource {
    async fn list_devices(&self) -> Result<Vec<Device>> {
        Ok(self.devices.clone())
    }

    async fn list_props(&self, device_id: u32) -> Result<Vec<Prop>> {
        self.ensure_device(device_id)?;

        Ok(self
            .props
            .read()
            .iter()
            .filter(|(owner, _)| *owner == device_id)
            .map(|(_, prop)| prop.clone())
            .collect())
    }

    async fn set_prop(&self, device_id: u32, prop_id: u32, value: &str) -> Result<()> {
        self.ensure_device(device_id)?;

        let tokens = split_value(value);
        if tokens.is_empty() {
            return Err(XinputError::EmptyValue(prop_id));
        }

        let mut props = self.props.write();
        let prop = props
            .iter_mut()
            .find(|(owner, prop)| *owner == device_id && prop.id == prop_id)
            .map(|(_, prop)| prop)
            .ok_or_else(|| XinputError::CommandFailed {
                command: format!("xinput set-prop {} {} {}", device_id, prop_id, tokens.join(" ")),
                code: Some(1),
                stderr: format!("property {} doesn't exist", prop_id),
            })?;

        info!("[DRY RUN] set-prop {} {} {:?}", device_id, prop_id, value);
        prop.value = value.to_string();
        Ok(())
    }
}
