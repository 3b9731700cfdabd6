//! Модальные диалоги.
//!
//! Открытый диалог существует как значение внутри [`Modal`]. Закрыть его можно только
//! потребив значение через `confirm` или `cancel`, поэтому оба пути гарантированно
//! завершают сеанс диалога.

use super::selection::SelectionController;
use crate::config::DisplayConfig;
use crate::error::{XinputError, Result};
use crate::services::DeviceSource;
use tracing::{debug, error, info};

/// Открытый модальный диалог
#[derive(Debug)]
pub enum Modal {
    Edit(EditDialog),
    Settings(SettingsDialog),
    About,
}

/// Результат подтверждения: диалог закрыт или остался открытым после ошибки
#[derive(Debug)]
pub enum Confirmed<D> {
    Closed,
    KeptOpen(D),
}

/// Диалог редактирования значения свойства
#[derive(Debug)]
pub struct EditDialog {
    device_id: u32,
    prop_id: u32,
    prop_name: String,
    old_value: String,
    new_value: String,
    error: Option<String>,
}

impl EditDialog {
    /// Открыть для выбранного свойства; оба поля заполняются текущим значением
    pub fn open(selection: &SelectionController) -> Result<Self> {
        if !selection.edit_enabled() {
            return XinputError::invalid_transition("редактирование недоступно: свойство не выбрано");
        }

        let (Some(device), Some(prop)) = (selection.selected_device(), selection.selected_prop()) else {
            return XinputError::invalid_transition("нет выбранного устройства или свойства");
        };

        debug!("Открыт диалог редактирования: {} / {}", device, prop);
        Ok(Self {
            device_id: device.id,
            prop_id: prop.id,
            prop_name: prop.name.clone(),
            old_value: prop.value.clone(),
            new_value: prop.value.clone(),
            error: None,
        })
    }

    pub fn insert_char(&mut self, c: char) {
        self.new_value.push(c);
    }

    pub fn backspace(&mut self) {
        self.new_value.pop();
    }

    pub fn clear_input(&mut self) {
        self.new_value.clear();
    }

    /// Применить новое значение. При успехе строка таблицы обновляется на месте
    /// и диалог закрывается; при ошибке таблица не меняется, а диалог остаётся открытым.
    pub async fn confirm(
        mut self,
        source: &dyn DeviceSource,
        selection: &mut SelectionController,
    ) -> Confirmed<Self> {
        match source.set_prop(self.device_id, self.prop_id, &self.new_value).await {
            Ok(()) => {
                if !selection.apply_prop_value(self.prop_id, &self.new_value) {
                    debug!("Строка свойства {} уже не отображается", self.prop_id);
                }
                info!(
                    "Свойство \"{}\" ({}) устройства {}: {:?} -> {:?}",
                    self.prop_name, self.prop_id, self.device_id, self.old_value, self.new_value
                );
                Confirmed::Closed
            }
            Err(e) => {
                error!("Не удалось изменить свойство {}: {}", self.prop_id, e);
                self.error = Some(e.user_message());
                Confirmed::KeptOpen(self)
            }
        }
    }

    /// Закрыть без изменений
    pub fn cancel(self) {
        debug!("Редактирование свойства {} отменено", self.prop_id);
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }

    pub fn prop_id(&self) -> u32 {
        self.prop_id
    }

    pub fn prop_name(&self) -> &str {
        &self.prop_name
    }

    pub fn old_value(&self) -> &str {
        &self.old_value
    }

    pub fn new_value(&self) -> &str {
        &self.new_value
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Диалог настроек. Кнопка сохранения активна только после изменения флажка
#[derive(Debug)]
pub struct SettingsDialog {
    hide_prop_ids: bool,
    dirty: bool,
}

impl SettingsDialog {
    pub fn open(current: &DisplayConfig) -> Self {
        Self {
            hide_prop_ids: current.hide_prop_ids,
            dirty: false,
        }
    }

    pub fn toggle_hide_prop_ids(&mut self) {
        self.hide_prop_ids = !self.hide_prop_ids;
        self.dirty = true;
    }

    pub fn hide_prop_ids(&self) -> bool {
        self.hide_prop_ids
    }

    pub fn can_save(&self) -> bool {
        self.dirty
    }

    /// Вернуть новые настройки, если их можно сохранить; иначе диалог остаётся открытым
    pub fn save(self) -> std::result::Result<DisplayConfig, Self> {
        if !self.dirty {
            return Err(self);
        }
        Ok(DisplayConfig {
            hide_prop_ids: self.hide_prop_ids,
        })
    }

    pub fn cancel(self) {
        debug!("Настройки не сохранены");
    }
}
