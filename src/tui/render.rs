//! Отрисовка состояния приложения.

use crate::app::{App, EditDialog, Focus, Modal, SelectionState, SettingsDialog};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

const APP_NAME: &str = "xinput-tui";

/// Нарисовать главное окно и открытый диалог поверх него
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Tables
            Constraint::Length(4), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_devices(frame, app, panes[0]);
    render_props(frame, app, panes[1]);
    render_footer(frame, app, chunks[2]);

    match app.modal() {
        Some(Modal::Edit(dialog)) => render_edit_dialog(frame, dialog),
        Some(Modal::Settings(dialog)) => render_settings_dialog(frame, dialog),
        Some(Modal::About) => render_about_dialog(frame),
        None => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let selection = app.selection();
    let selected = match (selection.state(), selection.selected_device()) {
        (SelectionState::DeviceSelected(_), Some(device)) => device.to_string(),
        _ => "no device selected".to_string(),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} {} ", APP_NAME, env!("CARGO_PKG_VERSION")),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(selected, Style::default().fg(Color::Cyan)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn pane_block(title: &'static str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border)
}

fn header_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

/// Заглушка вместо пустой таблицы
fn render_placeholder(frame: &mut Frame, block: Block, text: &str, area: Rect) {
    let paragraph = Paragraph::new(Span::styled(
        format!(" {}", text),
        Style::default().fg(Color::DarkGray),
    ))
    .block(block);
    frame.render_widget(paragraph, area);
}

fn render_devices(frame: &mut Frame, app: &App, area: Rect) {
    let selection = app.selection();
    let block = pane_block(" Devices ", app.focus() == Focus::Devices);

    if selection.devices().is_empty() {
        render_placeholder(frame, block, "No devices (press R to refresh)", area);
        return;
    }

    let rows: Vec<Row> = selection
        .devices()
        .rows()
        .iter()
        .map(|device| {
            let style = if device.is_master() {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                format!(" {}", device.id),
                device.name.clone(),
                device.kind.clone(),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(16),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(vec![" ID", "Name", "Type"]).style(header_style()))
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = TableState::default().with_selected(selection.device_row());
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_props(frame: &mut Frame, app: &App, area: Rect) {
    let selection = app.selection();
    let hide_ids = app.config().display.hide_prop_ids;
    let block = pane_block(" Properties ", app.focus() == Focus::Props);

    if selection.props().is_empty() {
        let text = match selection.state() {
            SelectionState::NoDeviceSelected => "Select a device",
            SelectionState::DeviceSelected(_) => "Device has no properties",
        };
        render_placeholder(frame, block, text, area);
        return;
    }

    let rows: Vec<Row> = selection
        .props()
        .rows()
        .iter()
        .map(|prop| {
            let mut cells = Vec::with_capacity(3);
            if !hide_ids {
                cells.push(format!(" {}", prop.id));
            }
            cells.push(prop.name.clone());
            cells.push(prop.value.clone());
            Row::new(cells)
        })
        .collect();

    let (header, widths) = if hide_ids {
        (
            Row::new(vec![" Name", "Value"]),
            vec![Constraint::Percentage(50), Constraint::Percentage(50)],
        )
    } else {
        (
            Row::new(vec![" ID", "Name", "Value"]),
            vec![
                Constraint::Length(6),
                Constraint::Percentage(50),
                Constraint::Percentage(50),
            ],
        )
    };

    let table = Table::new(rows, widths)
        .header(header.style(header_style()))
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = TableState::default().with_selected(selection.prop_row());
    frame.render_stateful_widget(table, area, &mut state);
}

fn key_hint(key: &'static str, label: &'static str, enabled: bool) -> Vec<Span<'static>> {
    let (key_style, label_style) = if enabled {
        (Style::default().fg(Color::Yellow), Style::default())
    } else {
        let dim = Style::default().fg(Color::DarkGray);
        (dim, dim)
    };
    vec![
        Span::styled(key, key_style),
        Span::styled(label, label_style),
    ]
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = Vec::new();
    hints.extend(key_hint(" [↑/↓] ", "Select  ", true));
    hints.extend(key_hint("[Tab] ", "Pane  ", true));
    hints.extend(key_hint("[R] ", "Refresh  ", true));
    hints.extend(key_hint("[E] ", "Edit  ", app.selection().edit_enabled()));
    hints.extend(key_hint("[S] ", "Settings  ", true));
    hints.extend(key_hint("[A] ", "About  ", true));
    hints.extend(key_hint("[Q] ", "Quit", true));

    let status = match app.status() {
        Some(status) if status.is_error => Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(Color::Red),
        )),
        Some(status) => Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(""),
    };

    let footer = Paragraph::new(vec![Line::from(hints), status])
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

/// Прямоугольник по центру области заданного размера в процентах
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn popup(frame: &mut Frame, title: String, lines: Vec<Line>, percent_x: u16, percent_y: u16) {
    let area = centered_rect(percent_x, percent_y, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_edit_dialog(frame: &mut Frame, dialog: &EditDialog) {
    let label = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Property:  ", label),
            Span::raw(format!("{} ({})", dialog.prop_name(), dialog.prop_id())),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Old value: ", label),
            Span::raw(dialog.old_value().to_string()),
        ]),
        Line::from(vec![
            Span::styled("New value: ", label),
            Span::styled(
                format!("{}▏", dialog.new_value()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    if let Some(error) = dialog.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    let mut hints = Vec::new();
    hints.extend(key_hint("[Enter] ", "Apply  ", true));
    hints.extend(key_hint("[Esc] ", "Cancel  ", true));
    hints.extend(key_hint("[Ctrl+U] ", "Clear", true));
    lines.push(Line::from(hints));

    popup(
        frame,
        format!(" Edit property (device {}) ", dialog.device_id()),
        lines,
        70,
        40,
    );
}

fn render_settings_dialog(frame: &mut Frame, dialog: &SettingsDialog) {
    let checkbox = if dialog.hide_prop_ids() { "[x]" } else { "[ ]" };

    let mut hints = Vec::new();
    hints.extend(key_hint("[Space] ", "Toggle  ", true));
    hints.extend(key_hint("[Enter] ", "Save  ", dialog.can_save()));
    hints.extend(key_hint("[Esc] ", "Cancel", true));

    let lines = vec![
        Line::from(format!("{} Hide property IDs", checkbox)),
        Line::from(""),
        Line::from(hints),
    ];

    popup(frame, " Settings ".to_string(), lines, 50, 30);
}

fn render_about_dialog(frame: &mut Frame) {
    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION")),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Inspect and edit input device properties via xinput."),
        Line::from(format!("License: {}", env!("CARGO_PKG_LICENSE"))),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    popup(frame, " About ".to_string(), lines, 50, 40);
}
