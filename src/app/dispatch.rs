//! Таблица соответствия событий интерфейса переходам состояния.

use super::dialog::{Confirmed, EditDialog, Modal, SettingsDialog};
use super::{App, Focus, StatusMessage};
use crate::error::XinputError;
use tracing::{debug, error, info};

/// События интерфейса, не зависящие от конкретного терминала
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Refresh,
    SelectDevice(usize),
    SelectProp(usize),
    Focus(Focus),
    OpenEdit,
    EditInput(char),
    EditBackspace,
    EditClear,
    Confirm,
    Cancel,
    OpenSettings,
    ToggleHidePropIds,
    OpenAbout,
    Quit,
}

impl App {
    /// Обработать одно событие. Вызовы источника выполняются здесь же, до следующего события
    pub async fn dispatch(&mut self, event: UiEvent) {
        debug!("Событие: {:?}", event);

        if event == UiEvent::Quit {
            info!("Выход по запросу пользователя");
            self.should_quit = true;
            return;
        }

        match self.modal.take() {
            None => self.dispatch_main(event).await,
            Some(Modal::Edit(dialog)) => self.dispatch_edit(dialog, event).await,
            Some(Modal::Settings(dialog)) => self.dispatch_settings(dialog, event),
            Some(Modal::About) => self.dispatch_about(event),
        }
    }

    async fn dispatch_main(&mut self, event: UiEvent) {
        match event {
            UiEvent::Refresh => match self.selection.refresh(&*self.source).await {
                Ok(()) => {
                    self.focus = Focus::Devices;
                    self.status = Some(StatusMessage::info(format!(
                        "Devices found: {}",
                        self.selection.devices().len()
                    )));
                }
                Err(e) => self.report(e),
            },
            UiEvent::SelectDevice(row) => {
                if let Err(e) = self.selection.select_device(row, &*self.source).await {
                    self.report(e);
                }
            }
            UiEvent::SelectProp(row) => {
                if let Err(e) = self.selection.select_prop(row) {
                    self.report(e);
                }
            }
            UiEvent::Focus(focus) => self.focus = focus,
            UiEvent::OpenEdit => match EditDialog::open(&self.selection) {
                Ok(dialog) => self.modal = Some(Modal::Edit(dialog)),
                Err(e) => debug!("Редактирование не открыто: {}", e),
            },
            UiEvent::OpenSettings => {
                self.modal = Some(Modal::Settings(SettingsDialog::open(&self.config.display)));
            }
            UiEvent::OpenAbout => self.modal = Some(Modal::About),
            other => debug!("Событие {:?} игнорируется в главном окне", other),
        }
    }

    async fn dispatch_edit(&mut self, mut dialog: EditDialog, event: UiEvent) {
        match event {
            UiEvent::EditInput(c) => dialog.insert_char(c),
            UiEvent::EditBackspace => dialog.backspace(),
            UiEvent::EditClear => dialog.clear_input(),
            UiEvent::Confirm => {
                let prop_name = dialog.prop_name().to_string();
                match dialog.confirm(&*self.source, &mut self.selection).await {
                    Confirmed::Closed => {
                        self.status = Some(StatusMessage::info(format!("Property \"{}\" updated", prop_name)));
                    }
                    Confirmed::KeptOpen(dialog) => {
                        self.status = dialog.error().map(StatusMessage::error);
                        self.modal = Some(Modal::Edit(dialog));
                    }
                }
                return;
            }
            UiEvent::Cancel => {
                dialog.cancel();
                return;
            }
            other => debug!("Событие {:?} игнорируется в диалоге редактирования", other),
        }
        self.modal = Some(Modal::Edit(dialog));
    }

    fn dispatch_settings(&mut self, mut dialog: SettingsDialog, event: UiEvent) {
        match event {
            UiEvent::ToggleHidePropIds => dialog.toggle_hide_prop_ids(),
            UiEvent::Confirm => match dialog.save() {
                Ok(display) => {
                    self.config.display = display;
                    match self.config.save_display(&self.config_path) {
                        Ok(()) => self.status = Some(StatusMessage::info("Settings saved")),
                        Err(e) => self.report(XinputError::Config(e)),
                    }
                    return;
                }
                Err(unchanged) => dialog = unchanged,
            },
            UiEvent::Cancel => {
                dialog.cancel();
                return;
            }
            other => debug!("Событие {:?} игнорируется в диалоге настроек", other),
        }
        self.modal = Some(Modal::Settings(dialog));
    }

    fn dispatch_about(&mut self, event: UiEvent) {
        if !matches!(event, UiEvent::Confirm | UiEvent::Cancel) {
            self.modal = Some(Modal::About);
        }
    }

    fn report(&mut self, e: XinputError) {
        error!("{}", e);
        self.status = Some(StatusMessage::error(e.user_message()));
    }
}
