use crate::app::{App, Focus, Modal, UiEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Преобразовать нажатие клавиши в событие интерфейса с учётом открытого диалога и фокуса
pub fn map_key(app: &App, key: KeyEvent) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    match app.modal() {
        Some(Modal::Edit(_)) => match key.code {
            KeyCode::Enter => Some(UiEvent::Confirm),
            KeyCode::Esc => Some(UiEvent::Cancel),
            KeyCode::Backspace => Some(UiEvent::EditBackspace),
            KeyCode::Char('u') if ctrl => Some(UiEvent::EditClear),
            KeyCode::Char(c) if !ctrl => Some(UiEvent::EditInput(c)),
            _ => None,
        },
        Some(Modal::Settings(_)) => match key.code {
            KeyCode::Char(' ') | KeyCode::Char('h') => Some(UiEvent::ToggleHidePropIds),
            KeyCode::Enter | KeyCode::Char('s') => Some(UiEvent::Confirm),
            KeyCode::Esc | KeyCode::Char('q') => Some(UiEvent::Cancel),
            _ => None,
        },
        Some(Modal::About) => Some(UiEvent::Cancel),
        None => map_main_key(app, key.code),
    }
}

fn map_main_key(app: &App, code: KeyCode) -> Option<UiEvent> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char('r') | KeyCode::F(5) => Some(UiEvent::Refresh),
        KeyCode::Char('s') => Some(UiEvent::OpenSettings),
        KeyCode::Char('a') | KeyCode::Char('?') => Some(UiEvent::OpenAbout),
        KeyCode::Char('e') => Some(UiEvent::OpenEdit),
        KeyCode::Tab => Some(UiEvent::Focus(match app.focus() {
            Focus::Devices => Focus::Props,
            Focus::Props => Focus::Devices,
        })),
        KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::Focus(Focus::Props)),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Some(UiEvent::Focus(Focus::Devices)),
        KeyCode::Enter => match app.focus() {
            Focus::Devices => Some(UiEvent::Focus(Focus::Props)),
            Focus::Props => Some(UiEvent::OpenEdit),
        },
        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, false),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, true),
        _ => None,
    }
}

/// Перемещение курсора выбирает строку под ним, как сигнал изменения выделения в списке
fn move_cursor(app: &App, down: bool) -> Option<UiEvent> {
    let selection = app.selection();
    match app.focus() {
        Focus::Devices => step(selection.device_row(), selection.devices().len(), down)
            .map(UiEvent::SelectDevice),
        Focus::Props => {
            if selection.selected_device().is_none() {
                return None;
            }
            step(selection.prop_row(), selection.props().len(), down).map(UiEvent::SelectProp)
        }
    }
}

/// Следующая строка или `None`, если выбор не меняется
fn step(current: Option<usize>, len: usize, down: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let next = match (current, down) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(row), true) => (row + 1).min(len - 1),
        (Some(row), false) => row.saturating_sub(1),
    };

    (current != Some(next)).then_some(next)
}
