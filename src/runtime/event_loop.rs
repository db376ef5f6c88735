use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{BridgeEvent, PlaybackBridge};
use crate::config;
use crate::ui::{self, TransportButton, ViewLayout, VolumeClick};

/// Main terminal event loop: applies bridge notifications, draws, and
/// dispatches input. Returns `Ok(())` when the user quits.
pub fn run<B: PlaybackBridge>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<B>,
    events: &Receiver<BridgeEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut layout = ViewLayout::default();

    loop {
        drain_bridge_events(events, app);
        app.sync_cursor();

        terminal.draw(|f| layout = ui::draw(f, app, settings))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, app) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, settings, &layout, app),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Apply every pending notification from the audio thread.
pub(super) fn drain_bridge_events<B: PlaybackBridge>(
    events: &Receiver<BridgeEvent>,
    app: &mut App<B>,
) {
    while let Ok(event) = events.try_recv() {
        app.controller.handle_event(event);
    }
}

/// Returns `true` when the key asks to quit.
pub(super) fn handle_key_event<B: PlaybackBridge>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<B>,
) -> bool {
    let skip = settings.controls.skip_seconds as f64;
    let step = settings.controls.volume_step;

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => app.controller.toggle_play(),
        KeyCode::Char('l') | KeyCode::Char('n') => {
            app.follow_playback = true;
            app.controller.next();
        }
        KeyCode::Char('h') | KeyCode::Char('b') => {
            app.follow_playback = true;
            app.controller.previous();
        }
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Enter => app.play_cursor(),
        KeyCode::Left | KeyCode::Char('H') => app.controller.skip_by(-skip),
        KeyCode::Right | KeyCode::Char('L') => app.controller.skip_by(skip),
        KeyCode::Char(c @ '0'..='9') => {
            let tenth = c.to_digit(10).unwrap_or(0);
            app.controller.seek(f64::from(tenth) * 10.0);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => app.controller.nudge_volume(step),
        KeyCode::Char('-') => app.controller.nudge_volume(-step),
        KeyCode::Char('m') => app.controller.toggle_mute(),
        _ => {}
    }

    false
}

pub(super) fn handle_mouse_event<B: PlaybackBridge>(
    mouse: MouseEvent,
    settings: &config::Settings,
    layout: &ViewLayout,
    app: &mut App<B>,
) {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let capabilities = app.controller.capabilities();
            let total = app.playlist().len();
            if let Some(index) = ui::playlist_row_at(layout, total, app.cursor, column, row) {
                app.activate_row(index);
            } else if let Some(percent) = ui::progress_percent_at(layout, column, row) {
                app.controller.seek(percent);
            } else if let Some(button) = ui::transport_button_at(layout, capabilities, column, row)
            {
                press_transport(button, settings, app);
            } else if let Some(click) = ui::volume_click_at(layout, capabilities, column, row) {
                match click {
                    VolumeClick::ToggleMute => app.controller.toggle_mute(),
                    VolumeClick::Level(level) => app.controller.set_volume(level),
                }
            }
        }
        MouseEventKind::ScrollDown => app.cursor_down(),
        MouseEventKind::ScrollUp => app.cursor_up(),
        _ => {}
    }
}

fn press_transport<B: PlaybackBridge>(
    button: TransportButton,
    settings: &config::Settings,
    app: &mut App<B>,
) {
    let skip = settings.controls.skip_seconds as f64;
    match button {
        TransportButton::Rewind => app.controller.skip_by(-skip),
        TransportButton::Previous => {
            app.follow_playback = true;
            app.controller.previous();
        }
        TransportButton::PlayPause => app.controller.toggle_play(),
        TransportButton::Next => {
            app.follow_playback = true;
            app.controller.next();
        }
        TransportButton::FastForward => app.controller.skip_by(skip),
    }
}
