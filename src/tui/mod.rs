mod actions;
mod app;
mod event;
mod input_handler;
mod theme;
mod ui;
pub mod widgets;

pub use app::App;

use std::io;
use std::path::Path;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::calendar::CalendarWindow;
use crate::error::{MonthlineError, Result};

/// Run the TUI application
pub fn run(
    data_dir: Option<&Path>,
    window: Option<CalendarWindow>,
    read_only: bool,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(|e| MonthlineError::Tui(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| MonthlineError::Tui(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| MonthlineError::Tui(e.to_string()))?;

    // Create app and run
    let result = App::new(data_dir, window, read_only)
        .and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode().map_err(|e| MonthlineError::Tui(e.to_string()))?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| MonthlineError::Tui(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| MonthlineError::Tui(e.to_string()))?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let events = event::EventHandler::new(app.config.tick_rate_ms);

    let size = terminal
        .size()
        .map_err(|e| MonthlineError::Tui(e.to_string()))?;
    app.terminal_size = (size.width, size.height);

    while app.running {
        terminal
            .draw(|f| ui::render(f, app))
            .map_err(|e| MonthlineError::Tui(e.to_string()))?;

        match events.next()? {
            event::Event::Key(key) => {
                actions::handle_key_event(app, key)?;
            }
            event::Event::Mouse(mouse) => {
                actions::handle_mouse_event(app, mouse)?;
            }
            event::Event::Resize(width, height) => {
                app.terminal_size = (width, height);
            }
            event::Event::Tick => {
                app.tick();
            }
        }
    }

    Ok(())
}
