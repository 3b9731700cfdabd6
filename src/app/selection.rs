use crate::error::{XinputError, Result};
use crate::model::{Device, DeviceTable, Prop, PropTable};
use crate::services::DeviceSource;
use tracing::{debug, info};

/// Состояние выбора устройства
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoDeviceSelected,
    DeviceSelected(u32),
}

/// Контроллер выбора: владеет обеими таблицами и следит, чтобы таблица свойств
/// всегда соответствовала выбранному устройству.
///
/// Данные запрашиваются у источника до изменения состояния, поэтому при ошибке
/// источника переход не происходит и таблицы остаются прежними.
#[derive(Debug)]
pub struct SelectionController {
    devices: DeviceTable,
    props: PropTable,
    state: SelectionState,
    device_row: Option<usize>,
    prop_row: Option<usize>,
    edit_enabled: bool,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            devices: DeviceTable::new(),
            props: PropTable::new(),
            state: SelectionState::NoDeviceSelected,
            device_row: None,
            prop_row: None,
            edit_enabled: false,
        }
    }

    /// Перечитать список устройств; выбор сбрасывается, таблица свойств очищается
    pub async fn refresh(&mut self, source: &dyn DeviceSource) -> Result<()> {
        let devices = source.list_devices().await?;
        info!("Список устройств обновлён: {} устройств", devices.len());

        self.props.clear();
        self.state = SelectionState::NoDeviceSelected;
        self.device_row = None;
        self.prop_row = None;
        self.edit_enabled = false;
        self.devices.replace(devices);
        Ok(())
    }

    /// Выбрать устройство по номеру строки и загрузить его свойства
    pub async fn select_device(&mut self, row: usize, source: &dyn DeviceSource) -> Result<()> {
        let Some(device) = self.devices.get(row) else {
            return XinputError::invalid_transition(format!(
                "строки устройства {} нет (всего {})",
                row,
                self.devices.len()
            ));
        };
        let device_id = device.id;

        let props = source.list_props(device_id).await?;
        debug!("{:?} -> DeviceSelected({}), {} свойств", self.state, device_id, props.len());

        self.props.replace(props);
        self.state = SelectionState::DeviceSelected(device_id);
        self.device_row = Some(row);
        self.prop_row = None;
        self.edit_enabled = false;
        Ok(())
    }

    /// Выбрать свойство; допустимо только при выбранном устройстве. Включает редактирование
    pub fn select_prop(&mut self, row: usize) -> Result<()> {
        if self.state == SelectionState::NoDeviceSelected {
            return XinputError::invalid_transition("свойство выбрано без выбранного устройства");
        }
        if self.props.get(row).is_none() {
            return XinputError::invalid_transition(format!(
                "строки свойства {} нет (всего {})",
                row,
                self.props.len()
            ));
        }

        self.prop_row = Some(row);
        self.edit_enabled = true;
        Ok(())
    }

    /// Записать новое значение в строку таблицы свойств, не перечитывая её у источника
    pub fn apply_prop_value(&mut self, prop_id: u32, value: &str) -> bool {
        self.props.set_value(prop_id, value)
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn devices(&self) -> &DeviceTable {
        &self.devices
    }

    pub fn props(&self) -> &PropTable {
        &self.props
    }

    pub fn device_row(&self) -> Option<usize> {
        self.device_row
    }

    pub fn prop_row(&self) -> Option<usize> {
        self.prop_row
    }

    pub fn selected_device(&self) -> Option<&Device> {
        self.device_row.and_then(|row| self.devices.get(row))
    }

    pub fn selected_prop(&self) -> Option<&Prop> {
        self.prop_row.and_then(|row| self.props.get(row))
    }

    pub fn edit_enabled(&self) -> bool {
        self.edit_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{mouse_scenario, Call, RecordingSource};

    #[tokio::test]
    async fn test_refresh_mirrors_source_order_and_clears_props() {
        let source = RecordingSource::new(
            vec![
                Device::new(9, "Keyboard", "slave keyboard"),
                Device::new(1, "Mouse", "slave pointer"),
                Device::new(5, "Pen", "floating slave"),
            ],
            vec![(1, Prop::new(10, "Accel Speed", "1.0"))],
        );
        let mut selection = SelectionController::new();

        selection.refresh(&source).await.unwrap();
        selection.select_device(1, &source).await.unwrap();
        assert!(!selection.props().is_empty());

        selection.refresh(&source).await.unwrap();
        let ids: Vec<u32> = selection.devices().rows().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![9, 1, 5]);
        assert!(selection.props().is_empty());
        assert_eq!(selection.state(), SelectionState::NoDeviceSelected);
        assert!(selection.selected_device().is_none());
        assert!(!selection.edit_enabled());
    }

    #[tokio::test]
    async fn test_select_device_loads_exactly_its_props() {
        let source = RecordingSource::new(
            vec![Device::new(1, "Mouse", "slave pointer"), Device::new(2, "Pad", "slave pointer")],
            vec![
                (1, Prop::new(10, "Accel Speed", "1.0")),
                (2, Prop::new(20, "Tapping Enabled", "1")),
                (1, Prop::new(11, "Device Enabled", "1")),
            ],
        );
        let mut selection = SelectionController::new();
        selection.refresh(&source).await.unwrap();

        selection.select_device(0, &source).await.unwrap();
        assert_eq!(selection.props().rows(), source.props_of(1).as_slice());
        assert_eq!(selection.state(), SelectionState::DeviceSelected(1));

        selection.select_prop(1).unwrap();
        assert_eq!(selection.selected_prop().map(|p| p.id), Some(11));

        // Повторный выбор другого устройства не оставляет строк первого
        selection.select_device(1, &source).await.unwrap();
        assert_eq!(selection.props().rows(), source.props_of(2).as_slice());
        assert!(selection.props().position(10).is_none());
        assert!(selection.selected_prop().is_none());
        assert!(!selection.edit_enabled());
    }

    #[tokio::test]
    async fn test_edit_enabled_only_after_select_prop() {
        let source = mouse_scenario();
        let mut selection = SelectionController::new();

        selection.refresh(&source).await.unwrap();
        assert!(!selection.edit_enabled());

        selection.select_device(0, &source).await.unwrap();
        assert!(!selection.edit_enabled());

        selection.select_prop(0).unwrap();
        assert!(selection.edit_enabled());

        selection.select_device(0, &source).await.unwrap();
        assert!(!selection.edit_enabled());

        selection.select_prop(0).unwrap();
        selection.refresh(&source).await.unwrap();
        assert!(!selection.edit_enabled());
    }

    #[tokio::test]
    async fn test_select_prop_without_device_is_rejected() {
        let source = mouse_scenario();
        let mut selection = SelectionController::new();
        selection.refresh(&source).await.unwrap();

        assert!(matches!(selection.select_prop(0), Err(XinputError::InvalidTransition(_))));
        assert!(!selection.edit_enabled());
    }

    #[tokio::test]
    async fn test_failed_list_props_keeps_previous_state() {
        let source = mouse_scenario();
        let mut selection = SelectionController::new();
        selection.refresh(&source).await.unwrap();
        selection.select_device(0, &source).await.unwrap();
        selection.select_prop(0).unwrap();

        source.fail_next_list();
        assert!(selection.select_device(0, &source).await.is_err());

        assert_eq!(selection.state(), SelectionState::DeviceSelected(1));
        assert_eq!(selection.props().len(), 1);
        assert!(selection.edit_enabled());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_devices() {
        let source = mouse_scenario();
        let mut selection = SelectionController::new();
        selection.refresh(&source).await.unwrap();

        source.fail_next_list();
        assert!(selection.refresh(&source).await.is_err());
        assert_eq!(selection.devices().len(), 1);
        assert_eq!(
            source.calls(),
            vec![Call::ListDevices, Call::ListDevices]
        );
    }

    #[tokio::test]
    async fn test_select_device_out_of_range() {
        let source = mouse_scenario();
        let mut selection = SelectionController::new();
        selection.refresh(&source).await.unwrap();

        let result = selection.select_device(7, &source).await;
        assert!(matches!(result, Err(XinputError::InvalidTransition(_))));
        assert!(!source.calls().contains(&Call::ListProps(1)));
    }
}
