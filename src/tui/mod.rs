mod keymap;
mod render;

use crate::app::{App, UiEvent};
use crate::error::Result;
use crate::xinput_error;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tracing::{debug, info, warn};

/// Запустить интерфейс и вернуть управление после выхода пользователя.
/// Терминал восстанавливается и при ошибке, и при панике.
pub async fn run(app: &mut App) -> Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode().map_err(|e| xinput_error!(terminal, "не удалось включить raw mode: {}", e))?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(xinput_error!(terminal, "не удалось открыть альтернативный экран: {}", e));
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    info!("Интерфейс запущен");

    let result = run_loop(&mut terminal, app).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        warn!("Не удалось восстановить терминал: {}", e);
    }
    info!("Интерфейс закрыт");

    result
}

fn restore_terminal<B: Backend + io::Write>(terminal: &mut Terminal<B>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Главный цикл. Все вызовы источника выполняются внутри `dispatch`, поэтому
/// следующее событие читается только после завершения предыдущего действия.
async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    app.dispatch(UiEvent::Refresh).await;

    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if app.should_quit() {
            return Ok(());
        }

        // Перерисовка нужна только после ввода: чтение блокирует до следующего события
        match event::read()? {
            Event::Key(key) => {
                if let Some(ui_event) = keymap::map_key(app, key) {
                    app.dispatch(ui_event).await;
                }
            }
            Event::Resize(width, height) => debug!("Размер терминала: {}x{}", width, height),
            _ => {}
        }
    }
}
