pub mod dialog;
pub mod dispatch;
pub mod selection;
#[cfg(test)]
pub mod testing;

pub use dialog::{EditDialog, Modal, SettingsDialog};
pub use dispatch::UiEvent;
pub use selection::{SelectionController, SelectionState};

use crate::config::Config;
use crate::services::DeviceSource;
use std::path::PathBuf;

/// Панель, в которой находится курсор
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Devices,
    Props,
}

/// Сообщение в строке состояния
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Состояние приложения. Всё принадлежит единственному UI-потоку
pub struct App {
    source: Box<dyn DeviceSource>,
    selection: SelectionController,
    modal: Option<Modal>,
    config: Config,
    config_path: PathBuf,
    focus: Focus,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    pub fn new(source: Box<dyn DeviceSource>, config: Config, config_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            selection: SelectionController::new(),
            modal: None,
            config,
            config_path: config_path.into(),
            focus: Focus::Devices,
            status: None,
            should_quit: false,
        }
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
