use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Charts),
        KeyCode::Char('3') => app.set_view(View::Processes),

        // Process table navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),

        // Manual reload, always refreshes the view
        KeyCode::Char('r') => app.reload(),

        // Auto-refresh toggle and interval adjustment
        KeyCode::Char(' ') => app.toggle_auto_refresh(Instant::now()),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.adjust_refresh_interval(500, Instant::now());
        }
        KeyCode::Char('-') => {
            app.adjust_refresh_interval(-500, Instant::now());
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
