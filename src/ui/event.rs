//! # Event Loop
//!
//! Reads one event, handles it to completion (including waiting for any
//! command it starts), redraws, and repeats until the user quits.
//!
//! ## Key Bindings
//!
//! - `↑` / `↓` - Move the selection, wrapping at either end
//! - `Enter` - Run the selected command
//! - `PgUp` / `PgDn` - Scroll the output by one page
//! - `q` / `Esc` - Quit
//!
//! Everything else is ignored.

use crate::command::CommandRunner;
use crate::ui::app::App;
use crate::ui::render;
use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, layout::Rect, Terminal};

/// Source of terminal events (allows dependency injection for testing)
pub trait EventReader {
    /// Block until the next event. `None` means the source is exhausted and
    /// the loop should stop.
    fn read_event(&mut self) -> Result<Option<Event>>;
}

/// Production event reader backed by crossterm's blocking read
pub struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self) -> Result<Option<Event>> {
        Ok(Some(
            event::read().context("Failed to read keyboard event")?,
        ))
    }
}

/// Apply a single key press to the dashboard.
pub fn handle_key(app: &mut App, key: KeyEvent, runner: &mut dyn CommandRunner) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Up => app.previous(),
        KeyCode::Down => app.next(),
        KeyCode::Enter => app.activate_selected(runner),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn resize(app: &mut App, width: u16, height: u16) {
    let area = Rect::new(0, 0, width, height);
    app.set_page_height(render::output_page_height(
        area,
        app.registry.list_width(),
    ));
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
    runner: &mut dyn CommandRunner,
) -> Result<()> {
    let size = terminal
        .size()
        .map_err(|e| anyhow!("Failed to query terminal size: {}", e))?;
    resize(app, size.width, size.height);

    loop {
        terminal
            .draw(|f| render::render(f, app))
            .map_err(|e| anyhow!("Failed to draw terminal UI: {}", e))?;

        let Some(event) = event_reader.read_event()? else {
            log::debug!("Event source closed");
            break;
        };

        match event {
            Event::Key(key) => handle_key(app, key, runner),
            Event::Resize(width, height) => resize(app, width, height),
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
