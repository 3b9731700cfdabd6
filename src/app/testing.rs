//! Тестовый источник устройств, записывающий все вызовы.

use crate::error::{XinputError, Result};
use crate::model::{Device, Prop};
use crate::services::DeviceSource;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListDevices,
    ListProps(u32),
    SetProp(u32, u32, String),
}

pub struct RecordingSource {
    devices: Vec<Device>,
    props: Mutex<Vec<(u32, Prop)>>,
    calls: Mutex<Vec<Call>>,
    fail_list: Mutex<bool>,
    fail_set: Mutex<bool>,
}

impl RecordingSource {
    pub fn new(devices: Vec<Device>, props: Vec<(u32, Prop)>) -> Self {
        Self {
            devices,
            props: Mutex::new(props),
            calls: Mutex::new(Vec::new()),
            fail_list: Mutex::new(false),
            fail_set: Mutex::new(false),
        }
    }

    pub fn props_of(&self, device_id: u32) -> Vec<Prop> {
        self.props
            .lock()
            .iter()
            .filter(|(owner, _)| *owner == device_id)
            .map(|(_, prop)| prop.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Следующий `list_devices`/`list_props` завершится ошибкой
    pub fn fail_next_list(&self) {
        *self.fail_list.lock() = true;
    }

    /// Следующий `set_prop` завершится ошибкой
    pub fn fail_next_set(&self) {
        *self.fail_set.lock() = true;
    }

    fn take_failure(flag: &Mutex<bool>, command: &str) -> Result<()> {
        let mut flag = flag.lock();
        if *flag {
            *flag = false;
            return Err(XinputError::CommandFailed {
                command: command.to_string(),
                code: Some(1),
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DeviceSource for RecordingSource {
    async fn list_devices(&self) -> Result<Vec<Device>> {
        self.calls.lock().push(Call::ListDevices);
        Self::take_failure(&self.fail_list, "xinput list --short")?;
        Ok(self.devices.clone())
    }

    async fn list_props(&self, device_id: u32) -> Result<Vec<Prop>> {
        self.calls.lock().push(Call::ListProps(device_id));
        Self::take_failure(&self.fail_list, "xinput list-props")?;
        Ok(self.props_of(device_id))
    }

    async fn set_prop(&self, device_id: u32, prop_id: u32, value: &str) -> Result<()> {
        self.calls
            .lock()
            .push(Call::SetProp(device_id, prop_id, value.to_string()));
        Self::take_failure(&self.fail_set, "xinput set-prop")?;

        if let Some((_, prop)) = self
            .props
            .lock()
            .iter_mut()
            .find(|(owner, prop)| *owner == device_id && prop.id == prop_id)
        {
            prop.value = value.to_string();
        }
        Ok(())
    }
}

/// Позволяет отдать источник в `App` и продолжать проверять его вызовы
#[async_trait::async_trait]
impl DeviceSource for Arc<RecordingSource> {
    async fn list_devices(&self) -> Result<Vec<Device>> {
        self.as_ref().list_devices().await
    }

    async fn list_props(&self, device_id: u32) -> Result<Vec<Prop>> {
        self.as_ref().list_props(device_id).await
    }

    async fn set_prop(&self, device_id: u32, prop_id: u32, value: &str) -> Result<()> {
        self.as_ref().set_prop(device_id, prop_id, value).await
    }
}

/// Устройство `{1, "Mouse", "slave pointer"}` со свойством `{10, "Accel Speed", "1.0"}`
pub fn mouse_scenario() -> RecordingSource {
    RecordingSource::new(
        vec![Device::new(1, "Mouse", "slave pointer")],
        vec![(1, Prop::new(10, "Accel Speed", "1.0"))],
    )
}
