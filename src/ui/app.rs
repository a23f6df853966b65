//! Main application state and UI loop
//!
//! Feeds queued dashboard events to the renderer, paints the screen and maps
//! key presses to dashboard actions

use crate::consts::dashboard_consts::timing::input_poll;
use crate::dashboard::{DashboardEvent, DashboardRenderer};
use crate::ui::dashboard::render_dashboard;
use crate::ui::host::TerminalHost;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc;

/// What a key press asks for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum KeyAction {
    Refresh,
    Dismiss,
    Quit,
    Ignore,
}

fn map_key(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('r') => KeyAction::Refresh,
        KeyCode::Char('x') => KeyAction::Dismiss,
        _ => KeyAction::Ignore,
    }
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The dashboard driving the screen model.
    renderer: DashboardRenderer,

    /// Receives events from the dashboard's background tasks.
    event_receiver: mpsc::Receiver<DashboardEvent>,

    /// The host the renderer writes into.
    host: TerminalHost,

    /// Whether to enable background colors
    with_background_color: bool,
}

impl App {
    pub fn new(
        renderer: DashboardRenderer,
        event_receiver: mpsc::Receiver<DashboardEvent>,
        host: TerminalHost,
        with_background_color: bool,
    ) -> Self {
        Self {
            renderer,
            event_receiver,
            host,
            with_background_color,
        }
    }

    /// Hand back the renderer so the caller can shut it down.
    pub fn into_renderer(self) -> DashboardRenderer {
        self.renderer
    }
}

/// Runs the application UI in a loop until the user quits.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> std::io::Result<()> {
    loop {
        // Apply everything queued since the last frame
        while let Ok(event) = app.event_receiver.try_recv() {
            app.renderer.handle(event);
        }

        let screen = app.host.screen();
        terminal.draw(|f| render_dashboard(f, &screen, app.with_background_color))?;

        // Poll for key events
        if event::poll(input_poll())? {
            match event::read()? {
                Event::Key(key) => {
                    // Skip events that are not KeyEventKind::Press
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }
                    match map_key(&key) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Refresh => app.renderer.handle(DashboardEvent::RefreshRequested),
                        KeyAction::Dismiss => {
                            app.renderer.handle(DashboardEvent::DismissNotification)
                        }
                        KeyAction::Ignore => {}
                    }
                }
                Event::Resize(_, _) => app.renderer.handle(DashboardEvent::Resize),
                _ => {}
            }
        }

        tokio::task::yield_now().await;
    }
}
